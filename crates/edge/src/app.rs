// crates/edge/src/app.rs

use crate::handlers;
use crate::rewrite::rewrite_legacy_product;

use axum::{middleware::from_fn, routing::get, Router};
use domain::product::ProductRegistry;
use serve::docs_paths::DocsPathsIndex;
use serve::locate::ContentStore;
use serve::versions::VersionManifest;
use std::sync::Arc;

/// Everything the route handlers read. Built once at startup; all fields are
/// immutable afterwards, so requests share it without synchronization.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProductRegistry>,
    pub manifest: Arc<VersionManifest>,
    pub store: Arc<ContentStore>,
    pub docs_paths: Arc<DocsPathsIndex>,
    /// Serve text content from the raw authored tree. Local development only.
    pub load_from_content_dir: bool,
}

#[tracing::instrument(skip_all)]
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/supported-products",
            get(handlers::supported_products),
        )
        .route("/api/all-docs-paths", get(handlers::all_docs_paths))
        .route("/api/content-versions", get(handlers::content_versions))
        .route(
            "/api/content/{productSlug}/version-metadata",
            get(handlers::version_metadata),
        )
        .route(
            "/api/content/{productSlug}/redirects",
            get(handlers::redirects),
        )
        .route(
            "/api/content/{productSlug}/nav-data/{version}/{*section}",
            get(handlers::nav_data),
        )
        .route(
            "/api/content/{productSlug}/doc/{version}/{*docsPath}",
            get(handlers::doc),
        )
        .route(
            "/api/assets/{productSlug}/{version}/{*assetPath}",
            get(handlers::asset),
        )
        .with_state(state)
        .layer(from_fn(rewrite_legacy_product))
}
