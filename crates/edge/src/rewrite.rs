//! Request rewrite for the legacy `ptfe-releases` slug.
//!
//! Any URI under `/api/content/ptfe-releases/*` or
//! `/api/assets/ptfe-releases/*` is rewritten to the equivalent
//! `terraform-enterprise` URI before the route handlers see it.

use axum::{extract::Request, middleware::Next, response::Response};
use http::Uri;

const REWRITE_PREFIXES: [&str; 2] = ["/api/content/ptfe-releases", "/api/assets/ptfe-releases"];

pub async fn rewrite_legacy_product(mut req: Request, next: Next) -> Response {
    let path = req.uri().path();
    let matched = REWRITE_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")));

    if matched {
        let source = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let rewritten = source.replacen("ptfe-releases", "terraform-enterprise", 1);
        if let Ok(uri) = Uri::try_from(rewritten) {
            *req.uri_mut() = uri;
        }
    }

    next.run(req).await
}
