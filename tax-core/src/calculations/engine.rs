//! Engine facade tying the schedule tables, policies and formatter together.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{CalculationRequest, TaxEngine, TaxError};
//!
//! let engine = TaxEngine::standard().unwrap();
//!
//! let result = engine
//!     .calculate_request(CalculationRequest {
//!         gross_amount: Some(dec!(60000000)),
//!         reliefs: Some(dec!(10000000)),
//!         category: "business".to_string(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.base_tax, dec!(15000000.00));
//! assert_eq!(result.levy, dec!(2000000.00));
//! assert_eq!(result.total_tax, dec!(17000000.00));
//!
//! let err = engine.calculate_request(CalculationRequest {
//!     category: "charity".to_string(),
//!     ..Default::default()
//! });
//! assert_eq!(err, Err(TaxError::InvalidCategory("charity".to_string())));
//! ```

use tracing::debug;

use super::formatter::format_result;
use super::policy::{CategoryPolicy, IndividualPolicy, Policy, SmallBusinessPolicy};
use crate::error::TaxError;
use crate::models::{
    CalculationInput, CalculationRequest, CalculationResult, TaxRegime, TaxpayerCategory,
};

/// Immutable calculator for one [`TaxRegime`].
///
/// Holds no per-call state, so a single instance can be shared freely across
/// threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxEngine {
    label: String,
    individual: Policy,
    small_business: Policy,
}

impl TaxEngine {
    /// Validates `regime` and builds the per-category policies.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidSchedule`] if the levy rate is out of range
    /// or the small-business schedule is not a flat-rate table.
    pub fn new(regime: TaxRegime) -> Result<Self, TaxError> {
        regime.validate()?;

        let individual = IndividualPolicy::new(regime.individual);
        let small_business =
            SmallBusinessPolicy::new(regime.small_business, regime.development_levy_rate)?;

        debug!(
            regime = %regime.label,
            individual_threshold = %individual.exemption_threshold(),
            turnover_threshold = %small_business.turnover_threshold(),
            "tax engine ready"
        );

        Ok(Self {
            label: regime.label,
            individual: Policy::Individual(individual),
            small_business: Policy::SmallBusiness(small_business),
        })
    }

    /// Engine over the built-in tables.
    pub fn standard() -> Result<Self, TaxError> {
        Self::new(TaxRegime::nigeria_2025()?)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn policy_for(
        &self,
        category: TaxpayerCategory,
    ) -> &Policy {
        match category {
            TaxpayerCategory::Individual => &self.individual,
            TaxpayerCategory::SmallBusiness => &self.small_business,
        }
    }

    /// Computes the rounded result for `input`.
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> CalculationResult {
        let policy = self.policy_for(input.category);
        let assessment = policy.assess(input);
        let result = format_result(&assessment, policy);

        debug!(
            category = input.category.as_str(),
            taxable = %result.taxable_amount,
            exempt = result.exemption_applied,
            total = %result.total_tax,
            "tax calculated"
        );

        result
    }

    /// Resolves a loosely-typed request and computes its result.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidCategory`] if the category is not
    /// recognised. No partial result is produced.
    pub fn calculate_request(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationResult, TaxError> {
        let input = CalculationInput::try_from(request)?;
        Ok(self.calculate(&input))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{BracketSchedule, ScheduleError, TaxBracket};
    use crate::schedules::individual_schedule;

    fn engine() -> TaxEngine {
        TaxEngine::standard().unwrap()
    }

    fn individual(
        gross_amount: Decimal,
        reliefs: Decimal,
    ) -> CalculationInput {
        CalculationInput {
            gross_amount,
            reliefs,
            category: TaxpayerCategory::Individual,
        }
    }

    fn business(
        gross_amount: Decimal,
        reliefs: Decimal,
    ) -> CalculationInput {
        CalculationInput {
            gross_amount,
            reliefs,
            category: TaxpayerCategory::SmallBusiness,
        }
    }

    // =========================================================================
    // construction
    // =========================================================================

    #[test]
    fn standard_engine_uses_built_in_label() {
        assert_eq!(engine().label(), "NG-2025");
    }

    #[test]
    fn new_rejects_progressive_business_schedule() {
        let mut regime = TaxRegime::nigeria_2025().unwrap();
        regime.small_business = individual_schedule().unwrap();

        assert_eq!(
            TaxEngine::new(regime),
            Err(TaxError::InvalidSchedule(ScheduleError::NotFlatRate))
        );
    }

    #[test]
    fn new_accepts_edited_individual_bands() {
        let mut regime = TaxRegime::nigeria_2025().unwrap();
        regime.individual = BracketSchedule::new(vec![
            TaxBracket::bounded(dec!(1000000), dec!(0)),
            TaxBracket::unbounded(dec!(0.10)),
        ])
        .unwrap();
        let engine = TaxEngine::new(regime).unwrap();

        let result = engine.calculate(&individual(dec!(1500000), dec!(0)));

        assert_eq!(result.total_tax, dec!(50000.00));
    }

    // =========================================================================
    // individual
    // =========================================================================

    #[test]
    fn individual_at_threshold_is_exempt() {
        let result = engine().calculate(&individual(dec!(800000), dec!(0)));

        assert!(result.exemption_applied);
        assert_eq!(result.base_tax, dec!(0));
        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.monthly_equivalent, Some(dec!(0)));
    }

    #[test]
    fn individual_one_million() {
        let result = engine().calculate(&individual(dec!(1000000), dec!(0)));

        assert_eq!(result.taxable_amount, dec!(1000000));
        assert_eq!(result.base_tax, dec!(14000));
        assert_eq!(result.levy, dec!(0));
        assert_eq!(result.total_tax, dec!(14000));
        assert_eq!(result.monthly_equivalent, Some(dec!(1166.67)));
        assert!(!result.exemption_applied);
    }

    #[test]
    fn individual_twenty_five_million() {
        let result = engine().calculate(&individual(dec!(25000000), dec!(0)));

        assert_eq!(result.base_tax, dec!(4814000));
        assert_eq!(result.total_tax, dec!(4814000));
        assert_eq!(result.monthly_equivalent, Some(dec!(401166.67)));
    }

    #[test]
    fn individual_reliefs_exceeding_income_clamp_to_zero() {
        let result = engine().calculate(&individual(dec!(500000), dec!(900000)));

        assert_eq!(result.taxable_amount, dec!(0));
        assert!(result.exemption_applied);
        assert_eq!(result.total_tax, dec!(0));
    }

    // =========================================================================
    // small business
    // =========================================================================

    #[test]
    fn business_below_turnover_threshold_is_exempt() {
        for reliefs in [dec!(0), dec!(5000000), dec!(90000000)] {
            let result = engine().calculate(&business(dec!(40000000), reliefs));

            assert!(result.exemption_applied);
            assert_eq!(result.total_tax, dec!(0));
            assert_eq!(result.levy, dec!(0));
        }
    }

    #[test]
    fn business_above_threshold() {
        let result = engine().calculate(&business(dec!(60000000), dec!(10000000)));

        assert_eq!(result.taxable_amount, dec!(50000000));
        assert_eq!(result.base_tax, dec!(15000000));
        assert_eq!(result.levy, dec!(2000000));
        assert_eq!(result.total_tax, dec!(17000000));
        assert_eq!(result.monthly_equivalent, None);
        assert!(!result.exemption_applied);
    }

    // =========================================================================
    // requests
    // =========================================================================

    #[test]
    fn request_with_missing_amounts_matches_explicit_zero() {
        let from_request = engine()
            .calculate_request(CalculationRequest {
                gross_amount: None,
                reliefs: None,
                category: "individual".to_string(),
            })
            .unwrap();

        assert_eq!(from_request, engine().calculate(&individual(dec!(0), dec!(0))));
    }

    #[test]
    fn request_with_unknown_category_fails() {
        let result = engine().calculate_request(CalculationRequest {
            gross_amount: Some(dec!(1000000)),
            reliefs: Some(dec!(0)),
            category: "cooperative".to_string(),
        });

        assert_eq!(result, Err(TaxError::InvalidCategory("cooperative".to_string())));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TaxEngine>();
    }
}
