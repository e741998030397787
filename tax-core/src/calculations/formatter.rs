//! Rounding and result assembly.
//!
//! Every money field is rounded to two decimal places (half-up). The total is
//! the sum of the *rounded* base tax and levy, so the displayed parts always
//! add up to the displayed total. The monthly figure is derived from that
//! rounded total and rounded again.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::round_half_up;
use super::policy::CategoryPolicy;
use crate::models::{CalculationResult, TaxpayerCategory};

/// Unrounded figures produced by a [`CategoryPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub category: TaxpayerCategory,
    pub gross_amount: Decimal,
    pub reliefs: Decimal,
    pub taxable_amount: Decimal,
    pub base_tax: Decimal,
    pub levy: Decimal,
    pub exemption_applied: bool,
}

/// Rounds `assessment` and assembles the final result, asking `policy` for
/// the monthly figure.
pub fn format_result<P>(
    assessment: &Assessment,
    policy: &P,
) -> CalculationResult
where
    P: CategoryPolicy + ?Sized,
{
    assemble(assessment, |total_tax| policy.monthly_equivalent(total_tax))
}

/// The one place rounding is applied. `monthly` receives the rounded total.
fn assemble(
    assessment: &Assessment,
    monthly: impl FnOnce(Decimal) -> Option<Decimal>,
) -> CalculationResult {
    let base_tax = round_half_up(assessment.base_tax);
    let levy = round_half_up(assessment.levy);
    let total_tax = base_tax + levy;

    CalculationResult {
        category: assessment.category,
        gross_amount: round_half_up(assessment.gross_amount),
        reliefs: round_half_up(assessment.reliefs),
        taxable_amount: round_half_up(assessment.taxable_amount),
        base_tax,
        levy,
        total_tax,
        monthly_equivalent: monthly(total_tax).map(round_half_up),
        exemption_applied: assessment.exemption_applied,
    }
}

impl From<&CalculationResult> for Assessment {
    fn from(result: &CalculationResult) -> Self {
        Self {
            category: result.category,
            gross_amount: result.gross_amount,
            reliefs: result.reliefs,
            taxable_amount: result.taxable_amount,
            base_tax: result.base_tax,
            levy: result.levy,
            exemption_applied: result.exemption_applied,
        }
    }
}

impl CalculationResult {
    /// Re-applies the rounding rules. A result produced by the engine comes
    /// back unchanged. The stored monthly figure is kept, only rounded.
    pub fn rounded(&self) -> Self {
        assemble(&Assessment::from(self), |_| self.monthly_equivalent)
    }
}
