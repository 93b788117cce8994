//! The paginated budget report.
//!
//! Lines are laid out on A4 pages in millimetres: the first band starts
//! [`TOP_MM`] from the top edge, each row takes [`ROW_MM`], each section
//! header [`HEADER_MM`], and the bottom [`FOOTER_BAND_MM`] of every page is
//! reserved for the footer. A line that would cross into the footer band
//! starts a new page.
//!
//! The laid-out document renders as plain text for terminals and as a
//! printable HTML file that is attached to emails.

use askama::Template;

use super::view::{ReportView, Row};
use super::{BRAND_BACKGROUND, BRAND_COLOR, COMPANY_NAME};

pub const PAGE_WIDTH_MM: u32 = 210;
pub const PAGE_HEIGHT_MM: u32 = 297;
pub const MARGIN_MM: u32 = 14;
pub const TOP_MM: u32 = 35;
pub const ROW_MM: u32 = 8;
pub const HEADER_MM: u32 = 10;
pub const FOOTER_BAND_MM: u32 = 40;
/// Y coordinate where the footer band begins.
pub const FOOTER_TOP_MM: u32 = PAGE_HEIGHT_MM - FOOTER_BAND_MM;

const DIVIDER_BEFORE_MM: u32 = 3;
const DIVIDER_AFTER_MM: u32 = 5;
const TEXT_WIDTH: usize = 72;

pub const TITLE: &str = "Poultry Budget Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Shaded section header.
    Header,
    Row,
    /// Indented sub-item.
    Bullet,
    /// Shaded, bold total.
    Total,
    /// Thin rule between sections.
    Divider,
}

impl LineKind {
    #[must_use]
    pub const fn height_mm(self) -> u32 {
        match self {
            Self::Header => HEADER_MM,
            Self::Row | Self::Bullet | Self::Total => ROW_MM,
            Self::Divider => DIVIDER_BEFORE_MM + DIVIDER_AFTER_MM,
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Row => "row",
            Self::Bullet => "row bullet",
            Self::Total => "row total",
            Self::Divider => "divider",
        }
    }
}

/// A positioned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub label: String,
    pub value: String,
    /// Top edge, from the top of the page.
    pub y_mm: u32,
}

impl Line {
    #[must_use]
    pub const fn height_mm(&self) -> u32 {
        self.kind.height_mm()
    }

    #[must_use]
    pub fn is_divider(&self) -> bool {
        self.kind == LineKind::Divider
    }

    #[must_use]
    pub fn is_bullet(&self) -> bool {
        self.kind == LineKind::Bullet
    }

    /// Where a divider's rule is drawn.
    #[must_use]
    pub const fn rule_y_mm(&self) -> u32 {
        self.y_mm + DIVIDER_BEFORE_MM
    }

    /// Fixed-width text rendering; values are right-aligned.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self.kind {
            LineKind::Divider => "-".repeat(TEXT_WIDTH),
            LineKind::Header => {
                let underline = "=".repeat(self.label.chars().count());
                format!("{}\n{underline}", self.label)
            }
            LineKind::Bullet => align(&format!("  • {}", self.label), &self.value),
            LineKind::Row | LineKind::Total => align(&self.label, &self.value),
        }
    }
}

fn align(label: &str, value: &str) -> String {
    let width = TEXT_WIDTH.saturating_sub(label.chars().count());
    format!("{label}{value:>width$}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub lines: Vec<Line>,
}

/// Text at the bottom of every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub contact: String,
    pub generated: String,
    pub powered_by: String,
}

/// A laid-out report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: &'static str,
    pub pages: Vec<Page>,
    pub footer: Footer,
}

impl Document {
    /// Lay out the report bands for a view.
    #[must_use]
    pub fn layout(view: &ReportView) -> Self {
        let mut layout = Layout::default();

        layout.header("BASIC INFORMATION");
        layout.row("Bird Type", &view.bird_type);
        layout.row("Number of Birds", &view.num_birds);
        layout.row("Production Period", &view.production_period_with_months);
        layout.row("Currency", &view.currency);
        layout.divider();

        layout.header("COSTS BREAKDOWN");
        layout.row("Total Feed Cost", &view.total_feed_cost);
        layout.row("Total Vaccination Cost", &view.total_vaccination_cost);
        layout.row("Total Drug Cost", &view.total_drug_cost);
        layout.row("Other Costs", "");
        layout.rows(&view.other_costs);
        layout.total("TOTAL COSTS", &view.total_costs);
        layout.divider();

        layout.header("REVENUE BREAKDOWN");
        layout.rows(&view.revenue);
        layout.divider();

        layout.total("NET PROFIT", &view.net_profit);
        layout.row("Profit Margin", &view.profit_margin);

        Self {
            title: TITLE,
            pages: layout.finish(),
            footer: Footer {
                contact: view.contact_line.clone(),
                generated: view.generated.clone(),
                powered_by: format!("Powered by {COMPANY_NAME}"),
            },
        }
    }

    /// Plain-text rendering, one block per page.
    ///
    /// # Errors
    ///
    /// Returns error if the template fails to render.
    pub fn render_text(&self) -> Result<String, askama::Error> {
        DocumentText { document: self }.render()
    }

    /// Printable HTML rendering with each page sized to A4.
    ///
    /// # Errors
    ///
    /// Returns error if the template fails to render.
    pub fn render_html(&self) -> Result<String, askama::Error> {
        DocumentHtml {
            document: self,
            page_width: PAGE_WIDTH_MM,
            page_height: PAGE_HEIGHT_MM,
            margin: MARGIN_MM,
            footer_top: FOOTER_TOP_MM,
            brand_color: BRAND_COLOR,
            brand_background: BRAND_BACKGROUND,
        }
        .render()
    }
}

#[derive(Template)]
#[template(path = "report/document.txt")]
struct DocumentText<'a> {
    document: &'a Document,
}

#[derive(Template)]
#[template(path = "report/document.html")]
struct DocumentHtml<'a> {
    document: &'a Document,
    page_width: u32,
    page_height: u32,
    margin: u32,
    footer_top: u32,
    brand_color: &'a str,
    brand_background: &'a str,
}

/// Places lines top to bottom, breaking pages above the footer band.
#[derive(Debug)]
struct Layout {
    pages: Vec<Page>,
    current: Vec<Line>,
    y_mm: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y_mm: TOP_MM,
        }
    }
}

impl Layout {
    fn push(&mut self, kind: LineKind, label: &str, value: &str) {
        if self.y_mm + kind.height_mm() > FOOTER_TOP_MM && !self.current.is_empty() {
            self.break_page();
            // A rule at the top of a fresh page separates nothing.
            if kind == LineKind::Divider {
                return;
            }
        }
        self.current.push(Line {
            kind,
            label: label.to_string(),
            value: value.to_string(),
            y_mm: self.y_mm,
        });
        self.y_mm += kind.height_mm();
    }

    fn header(&mut self, label: &str) {
        self.push(LineKind::Header, label, "");
    }

    fn row(&mut self, label: &str, value: &str) {
        self.push(LineKind::Row, label, value);
    }

    fn rows(&mut self, rows: &[Row]) {
        for row in rows {
            let kind = if row.bullet { LineKind::Bullet } else { LineKind::Row };
            self.push(kind, &row.label, &row.value);
        }
    }

    fn total(&mut self, label: &str, value: &str) {
        self.push(LineKind::Total, label, value);
    }

    fn divider(&mut self) {
        self.push(LineKind::Divider, "", "");
    }

    fn break_page(&mut self) {
        let lines = std::mem::take(&mut self.current);
        self.pages.push(Page {
            number: self.pages.len() + 1,
            lines,
        });
        self.y_mm = TOP_MM;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}
