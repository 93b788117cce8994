//! Terminal summary of a budget.

use askama::Template;

use super::view::ReportView;

#[derive(Template)]
#[template(path = "report/summary.txt")]
struct Summary<'a> {
    view: &'a ReportView,
}

/// Render the on-screen summary.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn render(view: &ReportView) -> Result<String, askama::Error> {
    Summary { view }.render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use river_poultry_core::{BirdType, BudgetForm, CurrencyCode};

    use super::*;

    fn view(price: &str) -> ReportView {
        let mut form = BudgetForm::new();
        form.set_bird_type(BirdType::Broiler);
        form.currency_code = CurrencyCode::KES;
        form.num_birds = "1000".to_string();
        form.production_period = "42".to_string();
        form.doc_cost_per_chick = "60".to_string();
        form.broiler_price = price.to_string();
        form.labour_cost = "5000".to_string();
        ReportView::new(
            &form.calculate(),
            &form.contact_info,
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_summary_lists_every_section() {
        let view = view("550");
        let text = render(&view).unwrap();
        assert!(text.starts_with("Budget Summary: Broilers, 1,000 birds, 42 days (2 months)"));
        for heading in ["\nFeed\n", "\nHealth\n", "\nOther costs\n", "\nRevenue\n", "\nResult\n"] {
            assert!(text.contains(heading), "missing {heading:?}");
        }
        assert!(text.contains("  - Labour Cost: KSh 10,000.00"));
        assert!(text.contains("  Final Sale Revenue: KSh 484,000.00"));
        assert!(text.contains("  - 4% mortality (no revenue)\n"));
        assert!(text.contains(&view.total_costs));
        assert!(text.contains("Net profit"));
    }

    #[test]
    fn test_summary_labels_loss() {
        let text = render(&view("1")).unwrap();
        assert!(text.contains("Net loss"));
        assert!(text.contains("-KSh "));
    }
}
