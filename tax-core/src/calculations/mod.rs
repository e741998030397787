//! Tax computation pipeline.
//!
//! The pieces run in a fixed order for every call: the category policy
//! derives the taxable base and decides exemption, the evaluator prices the
//! base against the category's schedule, the policy adds any levy, and the
//! formatter rounds and assembles the [`CalculationResult`](crate::CalculationResult).

pub mod common;
pub mod engine;
pub mod evaluator;
pub mod formatter;
pub mod policy;

pub use engine::TaxEngine;
pub use evaluator::{evaluate, evaluate_stepwise};
pub use formatter::{Assessment, format_result};
pub use policy::{CategoryPolicy, IndividualPolicy, Policy, SmallBusinessPolicy};
