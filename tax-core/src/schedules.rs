//! Built-in rate tables.
//!
//! Bands are listed as `(upper_bound, marginal_rate)` in ascending order;
//! `None` marks the unbounded top band. Changing a rate or adding a band is an
//! edit to these tables only. Alternative tables can also be loaded at runtime
//! through the `tax-data` crate.
//!
//! | Individual band            | Rate |
//! |----------------------------|------|
//! | 0 – 800,000                | 0%   |
//! | 800,000 – 1,500,000        | 7%   |
//! | 1,500,000 – 3,000,000      | 11%  |
//! | 3,000,000 – 5,000,000      | 15%  |
//! | 5,000,000 – 10,000,000     | 19%  |
//! | 10,000,000 – 20,000,000    | 21%  |
//! | above 20,000,000           | 25%  |
//!
//! Small businesses owe nothing up to a turnover of 50,000,000 and a flat 30%
//! above it, plus the development levy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{BracketSchedule, ScheduleError, TaxBracket};

pub const REGIME_LABEL: &str = "NG-2025";

pub const INDIVIDUAL_BANDS: &[(Option<Decimal>, Decimal)] = &[
    (Some(dec!(800000)), dec!(0)),
    (Some(dec!(1500000)), dec!(0.07)),
    (Some(dec!(3000000)), dec!(0.11)),
    (Some(dec!(5000000)), dec!(0.15)),
    (Some(dec!(10000000)), dec!(0.19)),
    (Some(dec!(20000000)), dec!(0.21)),
    (None, dec!(0.25)),
];

pub const SMALL_BUSINESS_BANDS: &[(Option<Decimal>, Decimal)] = &[
    (Some(dec!(50000000)), dec!(0)),
    (None, dec!(0.30)),
];

/// Development levy on assessable profits of non-exempt businesses.
pub const DEVELOPMENT_LEVY_RATE: Decimal = dec!(0.04);

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

fn build(bands: &[(Option<Decimal>, Decimal)]) -> Result<BracketSchedule, ScheduleError> {
    BracketSchedule::new(
        bands
            .iter()
            .map(|&(upper_bound, marginal_rate)| TaxBracket {
                upper_bound,
                marginal_rate,
            })
            .collect(),
    )
}

pub fn individual_schedule() -> Result<BracketSchedule, ScheduleError> {
    build(INDIVIDUAL_BANDS)
}

pub fn small_business_schedule() -> Result<BracketSchedule, ScheduleError> {
    build(SMALL_BUSINESS_BANDS)
}
