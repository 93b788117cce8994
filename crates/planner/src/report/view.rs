//! Display strings for one budget.
//!
//! [`ReportView`] formats every figure exactly once. The summary, the
//! document and the email are all rendered from the same view, so they can
//! only ever disagree about layout, never about numbers.

use chrono::{DateTime, Utc};
use river_poultry_core::{
    BudgetBreakdown, ContactInfo, CurrencyCode, Money, Revenue, group_thousands,
};
use rust_decimal::{Decimal, RoundingStrategy};

/// One label/value line. Bullets are indented sub-items of the line above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub value: String,
    pub bullet: bool,
}

impl Row {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            bullet: false,
        }
    }

    fn bullet(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            bullet: true,
            ..Self::new(label, value)
        }
    }
}

/// Every figure of a budget, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub bird_type: String,
    pub num_birds: String,
    /// e.g. `42 days`
    pub production_period: String,
    /// e.g. `42 days (2 months)`
    pub production_period_with_months: String,
    pub months: u32,
    pub currency: String,

    pub daily_intake_kg: String,
    pub feed_cost_per_kg: String,
    pub daily_feed_cost_per_bird: String,
    pub monthly_feed_cost: String,
    pub total_feed_cost: String,

    pub total_vaccination_cost: String,
    pub monthly_vaccination_cost: String,
    pub total_drug_cost: String,
    pub monthly_drug_cost: String,

    pub monthly_other_costs: String,
    pub first_month_other_costs: String,
    /// Labour, water, biosecurity, brooding and day-old chicks.
    pub other_costs: Vec<Row>,
    pub total_costs: String,

    pub monthly_revenue: String,
    pub total_revenue: String,
    /// Bird-type specific revenue lines.
    pub revenue: Vec<Row>,

    pub net_profit: String,
    pub profit_margin: String,
    pub is_loss: bool,

    pub salutation: &'static str,
    pub recipient_name: String,
    pub contact_line: String,
    pub generated: String,
}

impl ReportView {
    /// Format a breakdown for the given requester.
    #[must_use]
    pub fn new(breakdown: &BudgetBreakdown, contact: &ContactInfo, generated_at: DateTime<Utc>) -> Self {
        let params = &breakdown.parameters;
        let costs = &breakdown.costs;
        let currency = params.currency;
        let money = |amount: Decimal| Money::new(amount, currency).display();

        let production_period = format!(
            "{} {}",
            params.production_period.normalize(),
            params.age_unit()
        );
        let months = breakdown.months;

        Self {
            bird_type: params.bird_type.label().to_string(),
            num_birds: group_thousands(Decimal::from(params.bird_count), 0),
            production_period_with_months: format!("{production_period} ({months} months)"),
            production_period,
            months,
            currency: currency.code().to_string(),

            daily_intake_kg: format!("{} kg", fixed(breakdown.feed.daily_intake_kg, 3)),
            feed_cost_per_kg: money(breakdown.feed.cost_per_kg),
            daily_feed_cost_per_bird: money(breakdown.feed.daily_cost_per_bird),
            monthly_feed_cost: money(costs.feed_monthly),
            total_feed_cost: money(costs.feed_total),

            total_vaccination_cost: money(costs.vaccinations.total),
            monthly_vaccination_cost: money(costs.vaccinations.monthly_average),
            total_drug_cost: money(costs.drugs.total),
            monthly_drug_cost: money(costs.drugs.monthly_average),

            monthly_other_costs: money(costs.other_monthly),
            first_month_other_costs: money(costs.first_month_other),
            other_costs: vec![
                Row::bullet("Labour Cost", money(costs.labour_total)),
                Row::bullet("Water Cost", money(costs.water_total)),
                Row::bullet("Biosecurity Cost", money(costs.biosecurity_total)),
                Row::bullet("Brooding Cost", money(costs.brooding)),
                Row::bullet("Day-old Chick Cost", money(costs.chicks_total)),
            ],
            total_costs: money(breakdown.result.total_costs),

            monthly_revenue: money(breakdown.revenue.monthly()),
            total_revenue: money(breakdown.result.total_revenue),
            revenue: revenue_rows(&breakdown.revenue, currency),

            net_profit: money(breakdown.result.net_profit),
            profit_margin: format!("{}%", fixed(breakdown.result.profit_margin_percent, 1)),
            is_loss: breakdown.result.is_loss(),

            salutation: contact.salutation(),
            recipient_name: contact.recipient_name(),
            contact_line: contact.footer_line(),
            generated: format!(
                "Generated: {} at {} UTC",
                generated_at.format("%Y-%m-%d"),
                generated_at.format("%H:%M:%S")
            ),
        }
    }
}

fn revenue_rows(revenue: &Revenue, currency: CurrencyCode) -> Vec<Row> {
    let money = |amount: Decimal| Money::new(amount, currency).display();
    match *revenue {
        Revenue::Eggs { monthly, total, .. } => vec![
            Row::new("Monthly Egg Revenue", money(monthly)),
            Row::new("Total Egg Revenue", money(total)),
            Row::bullet("Based on 96% productive birds (4% mortality)", ""),
        ],
        Revenue::TerminalSale {
            full_price,
            discounted,
            total,
        } => vec![
            Row::new("Final Sale Revenue", money(total)),
            Row::bullet("80% sold at full price", money(full_price)),
            Row::bullet("16% sold at 50% price", money(discounted)),
            Row::bullet("4% mortality (no revenue)", ""),
        ],
    }
}

/// Round half away from zero and always show `digits` decimals.
fn fixed(value: Decimal, digits: u32) -> String {
    let rounded = value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.prec$}", prec = digits as usize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use river_poultry_core::{BirdType, BudgetForm};

    use super::*;

    fn broiler_form() -> BudgetForm {
        let mut form = BudgetForm::new();
        form.set_bird_type(BirdType::Broiler);
        form.currency_code = CurrencyCode::USD;
        form.num_birds = "1000".to_string();
        form.production_period = "42".to_string();
        form.doc_cost_per_chick = "1".to_string();
        form.broiler_price = "10".to_string();
        form.brooding_cost = "50".to_string();
        form.contact_info.phone = "712345678".to_string();
        form
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 5).unwrap()
    }

    #[test]
    fn test_basic_information() {
        let form = broiler_form();
        let view = ReportView::new(&form.calculate(), &form.contact_info, stamp());
        assert_eq!(view.bird_type, "Broilers");
        assert_eq!(view.num_birds, "1,000");
        assert_eq!(view.production_period, "42 days");
        assert_eq!(view.production_period_with_months, "42 days (2 months)");
        assert_eq!(view.currency, "USD");
        assert_eq!(view.salutation, "Farmer");
        assert_eq!(view.recipient_name, "Farmer (+254712345678)");
        assert_eq!(view.generated, "Generated: 2025-03-01 at 08:30:05 UTC");
    }

    #[test]
    fn test_terminal_sale_rows() {
        let form = broiler_form();
        let view = ReportView::new(&form.calculate(), &form.contact_info, stamp());
        assert_eq!(view.revenue[0], Row::new("Final Sale Revenue", "$ 8,800.00"));
        assert_eq!(view.revenue[1].value, "$ 8,000.00");
        assert_eq!(view.revenue[2].value, "$ 800.00");
        assert!(view.revenue[3].bullet);
        assert_eq!(view.monthly_revenue, "$ 0.00");
    }

    #[test]
    fn test_layer_rows() {
        let mut form = broiler_form();
        form.set_bird_type(BirdType::Layer);
        form.production_period = "4".to_string();
        form.egg_price = "5".to_string();
        let view = ReportView::new(&form.calculate(), &form.contact_info, stamp());
        assert_eq!(view.production_period, "4 weeks");
        assert_eq!(view.revenue[0], Row::new("Monthly Egg Revenue", "$ 3,840.00"));
        assert_eq!(view.revenue.len(), 3);
    }

    #[test]
    fn test_profit_margin_one_decimal() {
        assert_eq!(fixed(Decimal::new(12_345, 3), 1), "12.3");
        assert_eq!(fixed(Decimal::new(-5, 2), 1), "-0.1");
        assert_eq!(fixed(Decimal::ZERO, 1), "0.0");
        assert_eq!(fixed(Decimal::new(13, 2), 3), "0.130");
    }

    #[test]
    fn test_other_cost_rows() {
        let form = broiler_form();
        let view = ReportView::new(&form.calculate(), &form.contact_info, stamp());
        let labels: Vec<&str> = view.other_costs.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Labour Cost",
                "Water Cost",
                "Biosecurity Cost",
                "Brooding Cost",
                "Day-old Chick Cost"
            ]
        );
        assert_eq!(view.other_costs[3].value, "$ 50.00");
        assert_eq!(view.other_costs[4].value, "$ 1,000.00");
    }
}
