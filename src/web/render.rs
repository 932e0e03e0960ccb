//! HTML rendering for the calculation page

use std::fmt::Write;

use crate::error::LeaseError;
use crate::projection::CalculationSummary;
use super::form::LeaseForm;

/// Everything the page shows for one request
#[derive(Debug, Default)]
pub struct PageView<'a> {
    /// Submitted inputs to echo back; blank form when None
    pub form: Option<&'a LeaseForm>,
    pub summary: Option<&'a CalculationSummary>,
    pub error: Option<&'a LeaseError>,
}

/// Input field definition: (name, label, input type, extra attributes)
const FIELDS: [(&str, &str, &str, &str); 8] = [
    ("full_rental", "Full Rental", "number", r#" step="0.01""#),
    ("slc_interest_rate", "SLC Interest Rate (%)", "number", r#" step="0.01""#),
    ("inhouse_interest_rate", "Inhouse Interest Rate (%)", "number", r#" step="0.01""#),
    ("slc_nper", "SLC NPER", "number", ""),
    ("full_term", "Full Term (months)", "number", ""),
    ("start_date", "Start Date", "date", ""),
    ("rental_increase_percentage", "Rental Increase Percentage", "number", r#" step="0.01""#),
    ("rental_increase_month", "Rental Increase Month", "number", r#" min="1" max="12""#),
];

/// Format a summary amount for display
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

fn field_value<'a>(form: &'a LeaseForm, name: &str) -> &'a str {
    match name {
        "full_rental" => &form.full_rental,
        "slc_interest_rate" => &form.slc_interest_rate,
        "inhouse_interest_rate" => &form.inhouse_interest_rate,
        "slc_nper" => &form.slc_nper,
        "full_term" => &form.full_term,
        "start_date" => &form.start_date,
        "rental_increase_percentage" => &form.rental_increase_percentage,
        "rental_increase_month" => &form.rental_increase_month,
        _ => "",
    }
}

/// Escape text for use inside element content or a quoted attribute
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full page
pub fn render_page(view: &PageView) -> String {
    let mut html = String::new();

    // Writing to a String cannot fail
    let _ = write_page(&mut html, view);
    html
}

fn write_page(html: &mut String, view: &PageView) -> std::fmt::Result {
    writeln!(html, "<html>")?;
    writeln!(html, "<head>\n    <title>Financial Calculations</title>\n</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "    <h1>Financial Calculations Input</h1>")?;
    writeln!(html, r#"    <form method="POST">"#)?;

    for (name, label, input_type, attrs) in FIELDS {
        let value = view.form.map(|f| field_value(f, name)).unwrap_or("");
        writeln!(html, r#"        <label for="{name}">{label}:</label>"#)?;
        writeln!(
            html,
            r#"        <input type="{input_type}" id="{name}" name="{name}" value="{}"{attrs}><br><br>"#,
            escape_html(value)
        )?;
        writeln!(html)?;
    }

    writeln!(html, r#"        <input type="submit" value="Calculate">"#)?;
    writeln!(html, "    </form>")?;

    if let Some(error) = view.error {
        writeln!(html)?;
        writeln!(html, r#"    <p class="error"><strong>Error:</strong> {}</p>"#, escape_html(&error.to_string()))?;
    }

    if let Some(summary) = view.summary {
        writeln!(html)?;
        writeln!(html, "    <h2>Results</h2>")?;
        for (label, value) in summary.labelled() {
            writeln!(
                html,
                "    <p><strong>{}:</strong> {}</p>",
                escape_html(label),
                format_amount(value)
            )?;
        }
    }

    writeln!(html, "</body>")?;
    writeln!(html, "</html>")
}
