//! Plain-text rendering of results and rate tables.

use rust_decimal::Decimal;
use tax_core::calculations::Policy;
use tax_core::{CalculationResult, TaxEngine, TaxpayerCategory};

use crate::utils::{format_money, format_rate};

const LABEL_WIDTH: usize = 30;
const RULE: &str = "----------------------------------------------------";

#[derive(Default)]
struct Card {
    lines: Vec<String>,
}

impl Card {
    fn row(
        &mut self,
        label: &str,
        value: String,
    ) {
        self.lines
            .push(format!("{:<width$} {value:>20}", format!("{label}:"), width = LABEL_WIDTH));
    }

    fn line(
        &mut self,
        text: impl Into<String>,
    ) {
        self.lines.push(text.into());
    }

    fn divider(&mut self) {
        self.lines.push(RULE.to_string());
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

fn exemption_banner(
    category: TaxpayerCategory,
    engine: &TaxEngine,
    symbol: &str,
) -> String {
    match engine.policy_for(category) {
        Policy::Individual(policy) => format!(
            "Tax Exemption Applied - income is at or below the {} threshold",
            format_money(policy.exemption_threshold(), symbol)
        ),
        Policy::SmallBusiness(policy) => format!(
            "Small Business Exemption - turnover is at or below {}",
            format_money(policy.turnover_threshold(), symbol)
        ),
    }
}

fn levy_rate(engine: &TaxEngine) -> Decimal {
    match engine.policy_for(TaxpayerCategory::SmallBusiness) {
        Policy::SmallBusiness(policy) => policy.levy_rate(),
        Policy::Individual(_) => Decimal::ZERO,
    }
}

/// Renders one result the way the calculator card lays it out.
pub fn render_result(
    result: &CalculationResult,
    engine: &TaxEngine,
    symbol: &str,
) -> String {
    let business = result.category == TaxpayerCategory::SmallBusiness;
    let mut card = Card::default();

    card.line(format!("Tax Calculation Result ({})", result.category));
    card.divider();
    if result.exemption_applied {
        card.line(exemption_banner(result.category, engine, symbol));
        card.divider();
    }

    let income_label = if business {
        "Annual Revenue"
    } else {
        "Annual Income"
    };
    card.row(income_label, format_money(result.gross_amount, symbol));
    card.row(
        "Less: Reliefs & Allowances",
        format_money(result.reliefs, symbol),
    );
    card.divider();
    card.row("Taxable Income", format_money(result.taxable_amount, symbol));
    card.divider();

    let tax_label = if business {
        "Corporate Income Tax (CIT)"
    } else {
        "Personal Income Tax (PIT)"
    };
    card.row(tax_label, format_money(result.base_tax, symbol));
    if result.levy > Decimal::ZERO {
        card.row(
            &format!("Development Levy ({})", format_rate(levy_rate(engine))),
            format_money(result.levy, symbol),
        );
        card.divider();
    }
    card.row("Total Annual Tax Due", format_money(result.total_tax, symbol));
    if let Some(monthly) = result.monthly_equivalent {
        card.row("Monthly Tax (PAYE)", format_money(monthly, symbol));
    }

    card.finish()
}

/// Renders the rate table for every category in `engine`.
pub fn render_schedules(
    engine: &TaxEngine,
    symbol: &str,
) -> String {
    let mut card = Card::default();
    card.line(format!("Tax schedules: {}", engine.label()));

    for category in TaxpayerCategory::all() {
        card.divider();
        card.line(category.label());
        card.line(format!("  {:<40} {:>6} {:>20}", "Band", "Rate", "Tax below band"));
        for band in engine.policy_for(*category).schedule().bands() {
            let range = match band.upper_bound {
                Some(upper) => format!(
                    "{} - {}",
                    format_money(band.lower_bound, symbol),
                    format_money(upper, symbol)
                ),
                None => format!("above {}", format_money(band.lower_bound, symbol)),
            };
            card.line(format!(
                "  {range:<40} {:>6} {:>20}",
                format_rate(band.marginal_rate),
                format_money(band.base_tax, symbol)
            ));
        }
    }

    let levy = levy_rate(engine);
    if levy > Decimal::ZERO {
        card.divider();
        card.line(format!(
            "Development levy: {} of the small-business taxable base",
            format_rate(levy)
        ));
    }

    card.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::CalculationInput;

    use super::*;

    fn engine() -> TaxEngine {
        TaxEngine::standard().unwrap()
    }

    fn render(
        category: TaxpayerCategory,
        gross_amount: Decimal,
        reliefs: Decimal,
    ) -> String {
        let engine = engine();
        let result = engine.calculate(&CalculationInput {
            gross_amount,
            reliefs,
            category,
        });
        render_result(&result, &engine, "₦")
    }

    // ====================================================================
    // render_result
    // ====================================================================

    #[test]
    fn individual_card_shows_monthly_paye() {
        let text = render(TaxpayerCategory::Individual, dec!(1000000), Decimal::ZERO);

        assert!(text.contains("Annual Income:"));
        assert!(text.contains("Personal Income Tax (PIT):"));
        assert!(text.contains("₦14,000.00"));
        assert!(text.contains("Monthly Tax (PAYE):"));
        assert!(text.contains("₦1,166.67"));
        assert!(!text.contains("Development Levy"));
        assert!(!text.contains("Exemption"));
    }

    #[test]
    fn exempt_individual_shows_banner() {
        let text = render(TaxpayerCategory::Individual, dec!(800000), Decimal::ZERO);

        assert!(text.contains("Tax Exemption Applied"));
        assert!(text.contains("₦800,000.00 threshold"));
    }

    #[test]
    fn business_card_shows_levy_and_no_monthly() {
        let text = render(TaxpayerCategory::SmallBusiness, dec!(60000000), dec!(5000000));

        assert!(text.contains("Annual Revenue:"));
        assert!(text.contains("Corporate Income Tax (CIT):"));
        assert!(text.contains("₦16,500,000.00"));
        assert!(text.contains("Development Levy (4%):"));
        assert!(text.contains("₦2,200,000.00"));
        assert!(text.contains("₦18,700,000.00"));
        assert!(!text.contains("Monthly"));
    }

    #[test]
    fn exempt_business_hides_levy_row() {
        let text = render(TaxpayerCategory::SmallBusiness, dec!(50000000), Decimal::ZERO);

        assert!(text.contains("Small Business Exemption"));
        assert!(text.contains("₦50,000,000.00"));
        assert!(!text.contains("Development Levy"));
    }

    #[test]
    fn rows_are_aligned() {
        let text = render(TaxpayerCategory::Individual, dec!(1000000), Decimal::ZERO);
        let row = text
            .lines()
            .find(|line| line.starts_with("Taxable Income:"))
            .unwrap();

        assert_eq!(row.find('₦'), Some(LABEL_WIDTH + 1 + 20 - "₦1,000,000.00".chars().count()));
    }

    // ====================================================================
    // render_schedules
    // ====================================================================

    #[test]
    fn schedules_list_every_band() {
        let text = render_schedules(&engine(), "₦");

        assert!(text.starts_with("Tax schedules: NG-2025"));
        assert!(text.contains("₦0.00 - ₦800,000.00"));
        assert!(text.contains("above ₦20,000,000.00"));
        assert!(text.contains("25%"));
        assert!(text.contains("above ₦50,000,000.00"));
        assert!(text.contains("30%"));
        assert!(text.contains("₦3,564,000.00"));
        assert!(text.contains("Development levy: 4%"));
    }
}
