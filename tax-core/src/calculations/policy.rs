//! Category-specific rules layered over the bracket evaluator.
//!
//! Individuals and small businesses share one pipeline (clamp inputs, derive
//! the taxable base, test for exemption, price the base, add a levy) but
//! differ in every step that matters:
//!
//! | Step            | Individual                      | Small business                       |
//! |-----------------|---------------------------------|--------------------------------------|
//! | Exemption test  | taxable base <= 800,000         | **gross turnover** <= 50,000,000     |
//! | Base tax        | progressive schedule            | flat 30% of the taxable base         |
//! | Levy            | none                            | 4% of the taxable base               |
//! | Monthly figure  | total / 12                      | not reported                         |
//!
//! The business exemption deliberately looks at turnover while tax is
//! charged on the net base; reliefs never move a business into or out of the
//! exemption.

use rust_decimal::Decimal;
use tracing::warn;

use super::common::{clamp_non_negative, max};
use super::evaluator::evaluate;
use super::formatter::Assessment;
use crate::models::{BracketSchedule, CalculationInput, ScheduleError, TaxpayerCategory};
use crate::schedules::MONTHS_PER_YEAR;

/// The rules one taxpayer category applies on top of its schedule.
pub trait CategoryPolicy {
    fn category(&self) -> TaxpayerCategory;

    /// Gross amount less reliefs, floored at zero.
    fn taxable_base(
        &self,
        gross_amount: Decimal,
        reliefs: Decimal,
    ) -> Decimal {
        max(gross_amount - reliefs, Decimal::ZERO)
    }

    /// Whether the exemption applies, which zeroes both base tax and levy.
    fn compute_exemption(
        &self,
        gross_amount: Decimal,
        taxable_base: Decimal,
    ) -> bool;

    fn compute_base_tax(
        &self,
        taxable_base: Decimal,
    ) -> Decimal;

    fn compute_levy(
        &self,
        taxable_base: Decimal,
    ) -> Decimal;

    /// Monthly share of an already rounded annual total, if the category
    /// reports one.
    fn monthly_equivalent(
        &self,
        total_tax: Decimal,
    ) -> Option<Decimal>;

    /// Runs the category rules over `input` and returns the unrounded figures.
    ///
    /// Negative amounts are clamped to zero here; they are never an error.
    fn assess(
        &self,
        input: &CalculationInput,
    ) -> Assessment {
        let gross_amount = clamp_input("gross_amount", input.gross_amount);
        let reliefs = clamp_input("reliefs", input.reliefs);
        let taxable_amount = self.taxable_base(gross_amount, reliefs);
        let exemption_applied = self.compute_exemption(gross_amount, taxable_amount);

        let (base_tax, levy) = if exemption_applied {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let base_tax = self.compute_base_tax(taxable_amount);
            (base_tax, self.compute_levy(taxable_amount))
        };

        Assessment {
            category: self.category(),
            gross_amount,
            reliefs,
            taxable_amount,
            base_tax,
            levy,
            exemption_applied,
        }
    }
}

fn clamp_input(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value.is_sign_negative() && !value.is_zero() {
        warn!(field, %value, "negative amount treated as zero");
    }
    clamp_non_negative(Some(value))
}

// ─────────────────────────────────────────────────────────────────────────────
// individual
// ─────────────────────────────────────────────────────────────────────────────

/// Progressive personal income tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualPolicy {
    schedule: BracketSchedule,
    exemption_threshold: Decimal,
}

impl IndividualPolicy {
    /// The exemption threshold is the top of the schedule's leading 0% bands.
    pub fn new(schedule: BracketSchedule) -> Self {
        let exemption_threshold = schedule.zero_rate_ceiling();
        Self {
            schedule,
            exemption_threshold,
        }
    }

    pub fn schedule(&self) -> &BracketSchedule {
        &self.schedule
    }

    pub fn exemption_threshold(&self) -> Decimal {
        self.exemption_threshold
    }
}

impl CategoryPolicy for IndividualPolicy {
    fn category(&self) -> TaxpayerCategory {
        TaxpayerCategory::Individual
    }

    fn compute_exemption(
        &self,
        _gross_amount: Decimal,
        taxable_base: Decimal,
    ) -> bool {
        taxable_base <= self.exemption_threshold
    }

    fn compute_base_tax(
        &self,
        taxable_base: Decimal,
    ) -> Decimal {
        evaluate(taxable_base, &self.schedule)
    }

    fn compute_levy(
        &self,
        _taxable_base: Decimal,
    ) -> Decimal {
        Decimal::ZERO
    }

    fn monthly_equivalent(
        &self,
        total_tax: Decimal,
    ) -> Option<Decimal> {
        Some(total_tax / MONTHS_PER_YEAR)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// small business
// ─────────────────────────────────────────────────────────────────────────────

/// Corporate income tax with the small-company turnover exemption and the
/// development levy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmallBusinessPolicy {
    schedule: BracketSchedule,
    turnover_threshold: Decimal,
    corporate_rate: Decimal,
    levy_rate: Decimal,
}

impl SmallBusinessPolicy {
    /// Builds the policy from a two-band schedule: a 0% band up to the
    /// turnover threshold, then the flat corporate rate.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::NotFlatRate`] for any other schedule shape and
    /// [`ScheduleError::LevyRateOutOfRange`] if `levy_rate` is outside [0, 1].
    pub fn new(
        schedule: BracketSchedule,
        levy_rate: Decimal,
    ) -> Result<Self, ScheduleError> {
        if levy_rate < Decimal::ZERO || levy_rate > Decimal::ONE {
            return Err(ScheduleError::LevyRateOutOfRange(levy_rate));
        }

        let is_flat = schedule.len() == 2
            && schedule.bands()[0].marginal_rate.is_zero()
            && !schedule.top_rate().is_zero();
        if !is_flat {
            return Err(ScheduleError::NotFlatRate);
        }

        Ok(Self {
            turnover_threshold: schedule.zero_rate_ceiling(),
            corporate_rate: schedule.top_rate(),
            schedule,
            levy_rate,
        })
    }

    pub fn schedule(&self) -> &BracketSchedule {
        &self.schedule
    }

    pub fn turnover_threshold(&self) -> Decimal {
        self.turnover_threshold
    }

    pub fn corporate_rate(&self) -> Decimal {
        self.corporate_rate
    }

    pub fn levy_rate(&self) -> Decimal {
        self.levy_rate
    }
}

impl CategoryPolicy for SmallBusinessPolicy {
    fn category(&self) -> TaxpayerCategory {
        TaxpayerCategory::SmallBusiness
    }

    fn compute_exemption(
        &self,
        gross_amount: Decimal,
        _taxable_base: Decimal,
    ) -> bool {
        gross_amount <= self.turnover_threshold
    }

    /// Once above the threshold the whole taxable base is charged at the
    /// flat rate, not just the part above the threshold.
    fn compute_base_tax(
        &self,
        taxable_base: Decimal,
    ) -> Decimal {
        taxable_base * self.corporate_rate
    }

    fn compute_levy(
        &self,
        taxable_base: Decimal,
    ) -> Decimal {
        taxable_base * self.levy_rate
    }

    fn monthly_equivalent(
        &self,
        _total_tax: Decimal,
    ) -> Option<Decimal> {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tagged variant
// ─────────────────────────────────────────────────────────────────────────────

/// One policy per [`TaxpayerCategory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    Individual(IndividualPolicy),
    SmallBusiness(SmallBusinessPolicy),
}

impl Policy {
    fn inner(&self) -> &dyn CategoryPolicy {
        match self {
            Self::Individual(policy) => policy,
            Self::SmallBusiness(policy) => policy,
        }
    }

    pub fn schedule(&self) -> &BracketSchedule {
        match self {
            Self::Individual(policy) => policy.schedule(),
            Self::SmallBusiness(policy) => policy.schedule(),
        }
    }
}

impl CategoryPolicy for Policy {
    fn category(&self) -> TaxpayerCategory {
        self.inner().category()
    }

    fn taxable_base(
        &self,
        gross_amount: Decimal,
        reliefs: Decimal,
    ) -> Decimal {
        self.inner().taxable_base(gross_amount, reliefs)
    }

    fn compute_exemption(
        &self,
        gross_amount: Decimal,
        taxable_base: Decimal,
    ) -> bool {
        self.inner().compute_exemption(gross_amount, taxable_base)
    }

    fn compute_base_tax(
        &self,
        taxable_base: Decimal,
    ) -> Decimal {
        self.inner().compute_base_tax(taxable_base)
    }

    fn compute_levy(
        &self,
        taxable_base: Decimal,
    ) -> Decimal {
        self.inner().compute_levy(taxable_base)
    }

    fn monthly_equivalent(
        &self,
        total_tax: Decimal,
    ) -> Option<Decimal> {
        self.inner().monthly_equivalent(total_tax)
    }
}
