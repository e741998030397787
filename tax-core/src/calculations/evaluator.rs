//! Bracket evaluation.
//!
//! Prices a taxable amount against a [`BracketSchedule`]. The schedule
//! already carries the cumulative tax owed at the start of each band, so
//! [`evaluate`] only has to locate one band. [`evaluate_stepwise`] walks every
//! band and sums the slices; both must always agree.
//!
//! An amount sitting exactly on a band boundary is taxed in the lower band,
//! so 800,000 under the individual schedule owes nothing.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::evaluate;
//! use tax_core::schedules::individual_schedule;
//!
//! let schedule = individual_schedule().unwrap();
//!
//! // 3,564,000 owed on the first 20m, plus 25% of the remaining 5m
//! assert_eq!(evaluate(dec!(25000000), &schedule), dec!(4814000));
//! ```

use rust_decimal::Decimal;

use crate::models::BracketSchedule;

/// Tax owed on `taxable_amount` under `schedule`, unrounded.
///
/// Amounts at or below zero owe nothing.
pub fn evaluate(
    taxable_amount: Decimal,
    schedule: &BracketSchedule,
) -> Decimal {
    if taxable_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let Some(band) = schedule.bands().get(schedule.band_index(taxable_amount)) else {
        return Decimal::ZERO;
    };

    band.base_tax + band.marginal_rate * (taxable_amount - band.lower_bound)
}

/// Same result as [`evaluate`], computed by summing the taxed slice of every
/// band whose lower bound lies below `taxable_amount`.
pub fn evaluate_stepwise(
    taxable_amount: Decimal,
    schedule: &BracketSchedule,
) -> Decimal {
    schedule
        .bands()
        .iter()
        .take_while(|band| taxable_amount > band.lower_bound)
        .map(|band| {
            let top = band
                .upper_bound
                .map_or(taxable_amount, |upper| upper.min(taxable_amount));
            band.marginal_rate * (top - band.lower_bound)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TaxBracket;
    use crate::schedules::individual_schedule;

    fn flat_schedule() -> BracketSchedule {
        BracketSchedule::new(vec![TaxBracket::unbounded(dec!(0.10))]).unwrap()
    }

    // =========================================================================
    // individual schedule
    // =========================================================================

    #[test]
    fn evaluate_returns_zero_for_zero_income() {
        let schedule = individual_schedule().unwrap();

        assert_eq!(evaluate(dec!(0), &schedule), dec!(0));
    }

    #[test]
    fn evaluate_returns_zero_for_negative_income() {
        let schedule = individual_schedule().unwrap();

        assert_eq!(evaluate(dec!(-500), &schedule), dec!(0));
    }

    #[test]
    fn evaluate_boundary_belongs_to_lower_band() {
        let schedule = individual_schedule().unwrap();

        assert_eq!(evaluate(dec!(800000), &schedule), dec!(0));
        // (1,500,000 - 800,000) * 0.07
        assert_eq!(evaluate(dec!(1500000), &schedule), dec!(49000));
    }

    #[test]
    fn evaluate_second_band() {
        let schedule = individual_schedule().unwrap();

        // (1,000,000 - 800,000) * 0.07 = 14,000
        assert_eq!(evaluate(dec!(1000000), &schedule), dec!(14000));
    }

    #[test]
    fn evaluate_middle_band() {
        let schedule = individual_schedule().unwrap();

        // 214,000 + (4,000,000 - 3,000,000) * 0.15 = 364,000
        assert_eq!(evaluate(dec!(4000000), &schedule), dec!(364000));
    }

    #[test]
    fn evaluate_top_band() {
        let schedule = individual_schedule().unwrap();

        assert_eq!(evaluate(dec!(25000000), &schedule), dec!(4814000));
    }

    #[test]
    fn evaluate_keeps_sub_unit_precision() {
        let schedule = individual_schedule().unwrap();

        // 0.01 above the threshold at 7%
        assert_eq!(evaluate(dec!(800000.01), &schedule), dec!(0.0007));
    }

    // =========================================================================
    // agreement and shape
    // =========================================================================

    #[test]
    fn stepwise_matches_cumulative_across_all_bands() {
        let schedule = individual_schedule().unwrap();
        let samples = [
            dec!(0),
            dec!(1),
            dec!(799999.99),
            dec!(800000),
            dec!(800000.01),
            dec!(1234567.89),
            dec!(3000000),
            dec!(7500000),
            dec!(10000000.5),
            dec!(20000000),
            dec!(20000000.01),
            dec!(987654321.12),
        ];

        for amount in samples {
            assert_eq!(
                evaluate(amount, &schedule),
                evaluate_stepwise(amount, &schedule),
                "formulations disagree at {amount}"
            );
        }
    }

    #[test]
    fn evaluate_is_continuous_at_every_boundary() {
        let schedule = individual_schedule().unwrap();
        let epsilon = dec!(0.0001);

        for band in schedule.bands() {
            let Some(upper) = band.upper_bound else {
                continue;
            };
            let at = evaluate(upper, &schedule);
            let above = evaluate(upper + epsilon, &schedule);
            let below = evaluate(upper - epsilon, &schedule);

            assert!(above >= at && at >= below);
            // the jump over epsilon never exceeds the steepest possible slope
            assert!(above - below <= epsilon * dec!(2));
        }
    }

    #[test]
    fn evaluate_is_monotonic() {
        let schedule = individual_schedule().unwrap();
        let mut previous = Decimal::ZERO;
        let mut amount = Decimal::ZERO;

        while amount <= dec!(30000000) {
            let tax = evaluate(amount, &schedule);
            assert!(tax >= previous, "tax decreased at {amount}");
            previous = tax;
            amount += dec!(250000);
        }
    }

    #[test]
    fn evaluate_flat_schedule() {
        assert_eq!(evaluate(dec!(1234.50), &flat_schedule()), dec!(123.450));
    }
}
