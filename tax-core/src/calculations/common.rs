//! Common utility functions for tax calculations.
//!
//! Rounding and clamping helpers shared by the policy and formatter stages.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1166.665)), dec!(1166.67));
/// assert_eq!(round_half_up(dec!(1166.664)), dec!(1166.66));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Treats a missing or negative amount as zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::clamp_non_negative;
///
/// assert_eq!(clamp_non_negative(Some(dec!(-250))), dec!(0));
/// assert_eq!(clamp_non_negative(None), dec!(0));
/// assert_eq!(clamp_non_negative(Some(dec!(250))), dec!(250));
/// ```
pub fn clamp_non_negative(value: Option<Decimal>) -> Decimal {
    max(value.unwrap_or(Decimal::ZERO), Decimal::ZERO)
}
