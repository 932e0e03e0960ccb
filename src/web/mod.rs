//! Presentation layer: form decoding, page rendering and request dispatch
//!
//! Kept free of any HTTP framework so it can be exercised directly; the
//! Lambda handler only maps [`WebResponse`] onto its response type.

pub mod form;
pub mod render;

pub use form::LeaseForm;
pub use render::{render_page, PageView};

use crate::error::LeaseResult;
use crate::projection::{summarize, CalculationSummary, ValuationEngine};

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Methods the page answers to
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST";

/// Framework-independent response
#[derive(Debug, Clone, PartialEq)]
pub struct WebResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl WebResponse {
    fn html(status: u16, body: String) -> Self {
        Self { status, content_type: HTML_CONTENT_TYPE, body }
    }
}

/// Handle one request: blank form on GET, calculation on POST
pub fn respond(method: &str, body: &str) -> WebResponse {
    respond_with(&ValuationEngine::default(), method, body)
}

/// Same as [`respond`] with an explicit engine
pub fn respond_with(engine: &ValuationEngine, method: &str, body: &str) -> WebResponse {
    match method.to_ascii_uppercase().as_str() {
        "GET" => WebResponse::html(200, render_page(&PageView::default())),
        "HEAD" => WebResponse::html(200, String::new()),
        "POST" => submit(engine, body),
        other => {
            log::warn!("Rejected {} request", other);
            WebResponse {
                status: 405,
                content_type: "text/plain; charset=utf-8",
                body: "Method Not Allowed".to_string(),
            }
        }
    }
}

fn submit(engine: &ValuationEngine, body: &str) -> WebResponse {
    let form = match LeaseForm::from_urlencoded(body) {
        Ok(form) => form,
        Err(e) => {
            let page = render_page(&PageView { error: Some(&e), ..Default::default() });
            return WebResponse::html(400, page);
        }
    };

    match calculate(engine, &form) {
        Ok(summary) => {
            log::info!(
                "Calculated lease: first SLC NPV {:.2}, first CBR {:.2}",
                summary.first_slc_npv,
                summary.first_cbr
            );
            let page = render_page(&PageView {
                form: Some(&form),
                summary: Some(&summary),
                error: None,
            });
            WebResponse::html(200, page)
        }
        Err(e) => {
            log::warn!("Calculation rejected: {}", e);
            let page = render_page(&PageView {
                form: Some(&form),
                summary: None,
                error: Some(&e),
            });
            WebResponse::html(400, page)
        }
    }
}

/// Parse, validate and value a submitted form
pub fn calculate(engine: &ValuationEngine, form: &LeaseForm) -> LeaseResult<CalculationSummary> {
    let params = form.to_parameters()?;
    let rows = engine.project(&params)?;
    summarize(&rows)
}
