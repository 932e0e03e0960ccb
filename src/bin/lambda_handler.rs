//! AWS Lambda handler serving the lease calculation page
//!
//! GET renders a blank form; POST with form-encoded fields runs the valuation
//! and renders the results alongside the submitted inputs. HEAD answers with
//! headers only.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lease_valuation::web::{self, ALLOWED_METHODS};
use lambda_http::{run, service_fn, Body, Error, Request, Response};

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    };

    let resp = web::respond(event.method().as_str(), &body_str);

    log::info!(
        "{} {} -> {} in {:?}",
        event.method(),
        event.uri().path(),
        resp.status,
        start.elapsed()
    );

    let mut builder = Response::builder()
        .status(resp.status)
        .header("Content-Type", resp.content_type);
    if resp.status == 405 {
        builder = builder.header("Allow", ALLOWED_METHODS);
    }

    let body = if resp.body.is_empty() {
        Body::Empty
    } else {
        Body::Text(resp.body)
    };

    Ok(builder.body(body)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
