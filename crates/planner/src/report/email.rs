//! Email body for a budget report.

use askama::Template;

use super::view::ReportView;
use super::{BRAND_BACKGROUND, BRAND_COLOR, COMPANY_NAME, COMPANY_WEBSITE};

/// HTML body sent through the relay.
#[derive(Template)]
#[template(path = "report/email.html")]
struct EmailHtml<'a> {
    view: &'a ReportView,
    company: &'a str,
    website: &'a str,
    brand_color: &'a str,
    brand_background: &'a str,
}

/// Plain-text body used for the `mailto:` fallback.
#[derive(Template)]
#[template(path = "report/email.txt")]
struct EmailText<'a> {
    view: &'a ReportView,
    company: &'a str,
    website: &'a str,
}

/// Render the HTML email body.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn render_html(view: &ReportView) -> Result<String, askama::Error> {
    EmailHtml {
        view,
        company: COMPANY_NAME,
        website: COMPANY_WEBSITE,
        brand_color: BRAND_COLOR,
        brand_background: BRAND_BACKGROUND,
    }
    .render()
}

/// Render the plain-text email body.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn render_text(view: &ReportView) -> Result<String, askama::Error> {
    EmailText {
        view,
        company: COMPANY_NAME,
        website: COMPANY_WEBSITE,
    }
    .render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use river_poultry_core::{BirdType, BudgetForm};

    use super::*;

    fn view(phone: &str) -> ReportView {
        let mut form = BudgetForm::new();
        form.set_bird_type(BirdType::Layer);
        form.num_birds = "1000".to_string();
        form.production_period = "4".to_string();
        form.egg_price = "5".to_string();
        form.contact_info.phone = phone.to_string();
        form.contact_info.email = "farmer@example.com".to_string();
        ReportView::new(
            &form.calculate(),
            &form.contact_info,
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_html_greeting_and_branding() {
        let html = render_html(&view("712345678")).unwrap();
        assert!(html.contains("Dear Farmer,"));
        assert!(html.contains("#286844"));
        assert!(html.contains("#f1f2b0"));
        assert!(html.contains("www.riverpoultry.com"));
        assert!(html.contains("<strong>Production Period:</strong> 4 weeks"));

        let html = render_html(&view("")).unwrap();
        assert!(html.contains("Dear Customer,"));
    }

    #[test]
    fn test_text_body() {
        let view = view("");
        let text = render_text(&view).unwrap();
        assert!(text.starts_with("Dear Customer,"));
        assert!(text.contains(&format!("- Total Costs: {}", view.total_costs)));
        assert!(text.contains(&format!("- Net Profit: {}", view.net_profit)));
        assert!(text.contains("River Poultry & SmartVet Team"));
    }
}
