use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaxError;

/// Selects the bracket schedule and the policy branch for a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxpayerCategory {
    #[serde(rename = "individual")]
    Individual,
    #[serde(rename = "business", alias = "small_business")]
    SmallBusiness,
}

impl TaxpayerCategory {
    pub fn all() -> &'static [TaxpayerCategory] {
        &[TaxpayerCategory::Individual, TaxpayerCategory::SmallBusiness]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::SmallBusiness => "business",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::SmallBusiness => "Small Business",
        }
    }

    /// Parses a category name, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything that is not a known category; callers that
    /// need an error value should go through [`FromStr`].
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" => Some(Self::Individual),
            "business" | "small_business" | "small-business" | "smallbusiness" => {
                Some(Self::SmallBusiness)
            }
            _ => None,
        }
    }
}

impl FromStr for TaxpayerCategory {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxError::InvalidCategory(s.to_string()))
    }
}

impl fmt::Display for TaxpayerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
