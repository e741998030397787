use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BracketSchedule, ScheduleError};
use crate::schedules;

/// A versioned bundle of rate tables: one schedule per category plus the
/// small-business development levy rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegime {
    pub label: String,
    pub individual: BracketSchedule,
    pub small_business: BracketSchedule,
    pub development_levy_rate: Decimal,
}

impl TaxRegime {
    /// The built-in tables from the 2025 reform.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] only if the static tables are malformed.
    pub fn nigeria_2025() -> Result<Self, ScheduleError> {
        Ok(Self {
            label: schedules::REGIME_LABEL.to_string(),
            individual: schedules::individual_schedule()?,
            small_business: schedules::small_business_schedule()?,
            development_levy_rate: schedules::DEVELOPMENT_LEVY_RATE,
        })
    }

    /// Checks the parameters that are not already enforced by
    /// [`BracketSchedule`] construction.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.development_levy_rate < Decimal::ZERO || self.development_levy_rate > Decimal::ONE
        {
            return Err(ScheduleError::LevyRateOutOfRange(
                self.development_levy_rate,
            ));
        }
        Ok(())
    }
}
