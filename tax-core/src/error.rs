use thiserror::Error;

use crate::models::ScheduleError;

/// Errors surfaced by the tax engine.
///
/// Irregular money inputs (negative or missing amounts) are never errors;
/// they are clamped to zero before any computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    /// The taxpayer category is not one of the built-in categories.
    #[error("invalid taxpayer category '{0}'")]
    InvalidCategory(String),

    /// A bracket table or regime parameter failed validation at construction.
    #[error("invalid bracket schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),
}
