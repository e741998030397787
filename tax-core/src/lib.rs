//! Progressive tax computation engine.
//!
//! Given a declared gross amount, reliefs and a [`TaxpayerCategory`], the
//! engine derives the taxable base, applies the category's exemption rule,
//! evaluates the bracket schedule, adds any supplementary levy and returns a
//! rounded [`CalculationResult`]. Everything here is a pure function of its
//! inputs plus the fixed [`TaxRegime`] tables.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{CalculationInput, TaxEngine, TaxpayerCategory};
//!
//! let engine = TaxEngine::standard().unwrap();
//! let result = engine.calculate(&CalculationInput {
//!     gross_amount: dec!(1000000),
//!     reliefs: dec!(0),
//!     category: TaxpayerCategory::Individual,
//! });
//!
//! assert_eq!(result.total_tax, dec!(14000.00));
//! assert_eq!(result.monthly_equivalent, Some(dec!(1166.67)));
//! ```

pub mod calculations;
pub mod error;
pub mod models;
pub mod schedules;
pub mod store;

pub use calculations::TaxEngine;
pub use error::TaxError;
pub use models::*;
pub use store::{StoreError, TaxRecord, TaxRecordStore};
