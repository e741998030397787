use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of a bracket schedule as written in the rate tables.
///
/// `upper_bound` is the inclusive top of the band; `None` means the band is
/// unbounded. The lower bound is implied by the preceding band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub marginal_rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        marginal_rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            marginal_rate,
        }
    }

    pub fn unbounded(marginal_rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            marginal_rate,
        }
    }
}
