//! Validated, ordered bracket schedules.
//!
//! A [`BracketSchedule`] is built once from a list of [`TaxBracket`]s and
//! rejects malformed tables up front, so evaluation never has to deal with
//! gaps, overlaps or a missing top band. While validating, the schedule
//! precomputes the cumulative tax owed at the start of every band, which lets
//! the evaluator price any amount with a single lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxBracket;

/// Reasons a bracket table or regime parameter is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The schedule has no brackets at all.
    #[error("schedule has no brackets")]
    Empty,

    /// A marginal rate lies outside [0, 1].
    #[error("bracket {index} has rate {rate}, expected a value between 0 and 1")]
    RateOutOfRange { index: usize, rate: Decimal },

    /// An upper bound is zero or negative.
    #[error("bracket {index} has non-positive upper bound {bound}")]
    NonPositiveBound { index: usize, bound: Decimal },

    /// An upper bound does not exceed the previous one (unsorted or overlapping).
    #[error("bracket {index} upper bound {bound} does not exceed previous bound {previous}")]
    UnsortedBound {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    /// An unbounded bracket appears before the end of the schedule.
    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { index: usize },

    /// The last bracket has an upper bound, leaving amounts above it uncovered.
    #[error("last bracket is capped at {0}; schedule must extend to infinity")]
    BoundedTopBand(Decimal),

    /// A flat-rate schedule must be one 0% band followed by one taxed band.
    #[error("schedule is not a single 0% band followed by one flat-rate band")]
    NotFlatRate,

    /// The supplementary levy rate lies outside [0, 1].
    #[error("levy rate must be between 0 and 1, got {0}")]
    LevyRateOutOfRange(Decimal),
}

/// A bracket with its implied lower bound and the cumulative tax owed on
/// everything below that lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Band {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub marginal_rate: Decimal,
    pub base_tax: Decimal,
}

/// An ordered schedule of bands covering `[0, +inf)` with no gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketSchedule {
    bands: Vec<Band>,
}

impl BracketSchedule {
    /// Validates `brackets` and precomputes the cumulative base tax per band.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the list is empty, a rate is outside
    /// [0, 1], bounds are not strictly ascending and positive, or anything
    /// other than the final bracket is unbounded.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ScheduleError> {
        if brackets.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let last = brackets.len() - 1;
        let mut bands = Vec::with_capacity(brackets.len());
        let mut lower_bound = Decimal::ZERO;
        let mut base_tax = Decimal::ZERO;

        for (index, bracket) in brackets.into_iter().enumerate() {
            let rate = bracket.marginal_rate;
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ScheduleError::RateOutOfRange { index, rate });
            }

            match bracket.upper_bound {
                Some(bound) if bound <= Decimal::ZERO => {
                    return Err(ScheduleError::NonPositiveBound { index, bound });
                }
                Some(bound) if index > 0 && bound <= lower_bound => {
                    return Err(ScheduleError::UnsortedBound {
                        index,
                        bound,
                        previous: lower_bound,
                    });
                }
                Some(bound) if index == last => {
                    return Err(ScheduleError::BoundedTopBand(bound));
                }
                None if index != last => {
                    return Err(ScheduleError::UnboundedBeforeEnd { index });
                }
                _ => {}
            }

            bands.push(Band {
                lower_bound,
                upper_bound: bracket.upper_bound,
                marginal_rate: rate,
                base_tax,
            });

            if let Some(upper) = bracket.upper_bound {
                base_tax += (upper - lower_bound) * rate;
                lower_bound = upper;
            }
        }

        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Marginal rate of the unbounded top band.
    pub fn top_rate(&self) -> Decimal {
        self.bands
            .last()
            .map(|band| band.marginal_rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Upper bound of the leading run of 0% bands, or zero if the first band
    /// is already taxed. Amounts at or below this value owe nothing.
    pub fn zero_rate_ceiling(&self) -> Decimal {
        self.bands
            .iter()
            .take_while(|band| band.marginal_rate.is_zero())
            .filter_map(|band| band.upper_bound)
            .last()
            .unwrap_or(Decimal::ZERO)
    }

    /// Index of the band that prices `amount`. Amounts at or below zero map
    /// to the first band.
    pub(crate) fn band_index(
        &self,
        amount: Decimal,
    ) -> usize {
        self.bands
            .partition_point(|band| band.upper_bound.is_some_and(|upper| upper < amount))
    }

    /// The brackets this schedule was built from.
    pub fn brackets(&self) -> Vec<TaxBracket> {
        self.bands
            .iter()
            .map(|band| TaxBracket {
                upper_bound: band.upper_bound,
                marginal_rate: band.marginal_rate,
            })
            .collect()
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketSchedule {
    type Error = ScheduleError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketSchedule> for Vec<TaxBracket> {
    fn from(schedule: BracketSchedule) -> Self {
        schedule.brackets()
    }
}
