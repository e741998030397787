use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxpayerCategory;
use crate::error::TaxError;

/// Input to a single calculation.
///
/// Money fields are taken as given; negative values are clamped to zero by
/// the engine rather than rejected, and `reliefs` may exceed `gross_amount`.
/// Absent fields deserialize as zero. JSON numbers are read from their
/// literal digits, never through `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub gross_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub reliefs: Decimal,
    pub category: TaxpayerCategory,
}

/// Loosely-typed calculation input as it arrives from a form or request body.
///
/// Amounts are already numeric (string parsing happens upstream) but may be
/// missing, and the category is still free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub gross_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub reliefs: Option<Decimal>,
    pub category: String,
}

impl TryFrom<CalculationRequest> for CalculationInput {
    type Error = TaxError;

    fn try_from(request: CalculationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            gross_amount: request.gross_amount.unwrap_or(Decimal::ZERO),
            reliefs: request.reliefs.unwrap_or(Decimal::ZERO),
            category: request.category.parse()?,
        })
    }
}

/// The rounded outcome of one calculation, ready for display or storage.
///
/// Every money field is non-negative and rounded to two decimal places, and
/// `total_tax == base_tax + levy` holds exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub category: TaxpayerCategory,
    pub gross_amount: Decimal,
    pub reliefs: Decimal,
    pub taxable_amount: Decimal,
    pub base_tax: Decimal,
    pub levy: Decimal,
    pub total_tax: Decimal,
    /// Total tax spread over twelve months. Only reported for individuals.
    pub monthly_equivalent: Option<Decimal>,
    pub exemption_applied: bool,
}
