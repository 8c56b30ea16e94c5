//! Route handlers: translate URL parameters into calls against the
//! resolution core and map core failures to HTTP statuses.
//!
//! Every degraded core failure is logged with an `API Error:` prefix before
//! the generic body goes out; the message text lives on the error type, so
//! logs stay greppable while responses leak nothing.

use crate::app::AppState;
use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domain::product::normalize_slug;
use serde_json::json;
use serve::doc_versions::find_doc_versions;
use serve::locate::{join_file_path, staged_version, LocateOptions};
use serve::transform::{parse_json, parse_jsonc};
use serve::{front_matter::split_front_matter, Error};
use tracing::{error, warn};

const MISSING_PRODUCT_PARAM: &str = "Missing `product` query parameter. Please provide the `product` under which the requested document is expected to be found, for example `vault`.";
const MISSING_FULL_PATH_PARAM: &str = "Missing `fullPath` query parameter. Please provide the full document path, in the format `doc#<path/to/document>`, for example `doc#docs/internals`.";

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Log a core failure and build the degraded response its status maps to.
fn degrade(err: &Error) -> Response {
    error!("API Error: {err}");
    match err.to_status() {
        StatusCode::INTERNAL_SERVER_ERROR => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
        status => (status, "Not found").into_response(),
    }
}

/// Decoded query pairs, preserving repeats and order.
fn query_pairs(query: &Option<String>) -> Vec<(String, String)> {
    match query {
        Some(raw) => form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => Vec::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/supported-products
// ─────────────────────────────────────────────────────────────────────────────

pub async fn supported_products(State(state): State<AppState>) -> Response {
    Json(json!({ "result": state.registry.slugs() })).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/content/{productSlug}/version-metadata
// ─────────────────────────────────────────────────────────────────────────────

pub async fn version_metadata(
    State(state): State<AppState>,
    Path(product_slug): Path<String>,
) -> Response {
    match state.manifest.metadata_for(&product_slug) {
        Ok(entries) => Json(json!({ "result": entries })).into_response(),
        Err(err) => degrade(&err),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/content/{productSlug}/nav-data/{version}/{*section}
// ─────────────────────────────────────────────────────────────────────────────

pub async fn nav_data(
    State(state): State<AppState>,
    Path((product_slug, version, section)): Path<(String, String, String)>,
) -> Response {
    let Some(config) = state.registry.lookup(&product_slug) else {
        return degrade(&Error::UnknownProduct { slug: product_slug });
    };

    let meta = match state.manifest.resolve(&state.registry, &product_slug, &version) {
        Ok(meta) => meta,
        Err(err) => return degrade(&err),
    };

    let section_path = join_file_path(&[section]);
    let segments = vec![
        "content".to_owned(),
        product_slug.clone(),
        meta.version.clone(),
        config.data_dir.clone(),
        format!("{section_path}-nav-data.json"),
    ];

    let text = match state
        .store
        .read_text(&segments, &meta, LocateOptions::default())
    {
        Ok(text) => text,
        Err(err) => return degrade(&err),
    };

    match parse_json(&text) {
        Ok(nav_data) => Json(json!({ "result": { "navData": nav_data } })).into_response(),
        // Nav data is requested by path; a broken file behaves like a
        // missing one.
        Err(err) => {
            error!("API Error: {err}");
            not_found()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/content/{productSlug}/redirects
// ─────────────────────────────────────────────────────────────────────────────

pub async fn redirects(
    State(state): State<AppState>,
    Path(product_slug): Path<String>,
) -> Response {
    if !state.registry.contains(&product_slug) {
        return degrade(&Error::UnknownProduct { slug: product_slug });
    }

    let meta = match state
        .manifest
        .resolve(&state.registry, &product_slug, "latest")
    {
        Ok(meta) => meta,
        Err(err) => return degrade(&err),
    };

    let segments = vec![
        "content".to_owned(),
        product_slug.clone(),
        meta.version.clone(),
        "redirects.jsonc".to_owned(),
    ];
    let options = LocateOptions {
        load_from_content_dir: state.load_from_content_dir,
    };

    let text = match state.store.read_text(&segments, &meta, options) {
        Ok(text) => text,
        Err(_) => return not_found(),
    };

    match parse_jsonc(&text) {
        Ok(value) => Json(value).into_response(),
        Err(_) => {
            error!("API Error: Product, {product_slug}, redirects.jsonc could not be parsed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/content/{productSlug}/doc/{version}/{*docsPath}
// ─────────────────────────────────────────────────────────────────────────────

pub async fn doc(
    State(state): State<AppState>,
    Path((product_slug, version, docs_path)): Path<(String, String, String)>,
) -> Response {
    let Some(config) = state.registry.lookup(&product_slug) else {
        return degrade(&Error::UnknownProduct { slug: product_slug });
    };

    let meta = match state.manifest.resolve(&state.registry, &product_slug, &version) {
        Ok(meta) => meta,
        Err(err) => return degrade(&err),
    };

    let mut parsed_path = join_file_path(&[docs_path]);
    if let Some(stripped) = parsed_path.strip_suffix(".mdx") {
        parsed_path = stripped.to_owned();
    }

    // Named files (`slug.mdx`) are preferred over index files
    // (`slug/index.mdx`); both layouts exist in the prebuilt tree.
    let locations = [
        vec![
            "content".to_owned(),
            product_slug.clone(),
            meta.version.clone(),
            config.content_dir.clone(),
            format!("{parsed_path}.mdx"),
        ],
        vec![
            "content".to_owned(),
            product_slug.clone(),
            meta.version.clone(),
            config.content_dir.clone(),
            parsed_path.clone(),
            "index.mdx".to_owned(),
        ],
    ];

    let mut found: Option<(String, String)> = None;
    for location in &locations {
        if let Ok(text) = state
            .store
            .read_text(location, &meta, LocateOptions::default())
        {
            found = Some((text, join_file_path(location)));
            break;
        }
    }

    let Some((text, github_file)) = found else {
        let attempted: Vec<String> = locations
            .iter()
            .map(|location| format!("* {}", join_file_path(location)))
            .collect();
        error!(
            "API Error: No content found for {product_slug}/{version}/{parsed_path}\n\nChecked for content at: \n{}",
            attempted.join("\n")
        );
        return not_found();
    };

    // The docs-paths index is keyed by the on-disk version directory, with
    // unversioned products under their placeholder version.
    let index_version = if config.versioned_docs {
        staged_version(&meta)
    } else {
        "v0.0.x".to_owned()
    };
    let created_at = state
        .docs_paths
        .created_at(&product_slug, &index_version, &parsed_path)
        .map(str::to_owned);
    if created_at.is_none() && state.docs_paths.has_version(&product_slug, &index_version) {
        warn!("File metadata could not be found for file {github_file}");
    }

    let (metadata, markdown_source) = match split_front_matter(&text) {
        Ok(parts) => parts,
        Err(err) => return degrade(&err),
    };

    let reported_version = if config.versioned_docs {
        meta.version.clone()
    } else {
        "v0.0.x".to_owned()
    };

    Json(json!({
        "meta": { "status_code": 200, "status_text": "OK" },
        "result": {
            "fullPath": parsed_path,
            "product": product_slug,
            "version": reported_version,
            "metadata": metadata,
            "subpath": "docs",
            "markdownSource": markdown_source,
            "created_at": created_at,
            "sha": "",
            "githubFile": github_file,
        },
    }))
    .into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/assets/{productSlug}/{version}/{*assetPath}
// ─────────────────────────────────────────────────────────────────────────────

pub async fn asset(
    State(state): State<AppState>,
    Path((product_slug, version, asset_path)): Path<(String, String, String)>,
) -> Response {
    if !state.registry.contains(&product_slug) {
        return degrade(&Error::UnknownProduct { slug: product_slug });
    }

    let meta = match state.manifest.resolve(&state.registry, &product_slug, &version) {
        Ok(meta) => meta,
        Err(err) => return degrade(&err),
    };

    // The wildcard goes in as captured; the locator splits it and rejects
    // absolute or escaping components itself.
    let segments = vec![
        "assets".to_owned(),
        product_slug.clone(),
        meta.version.clone(),
        asset_path,
    ];

    match state.store.read_asset(&segments, &meta) {
        Ok(asset) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, asset.content_type)],
            asset.bytes,
        )
            .into_response(),
        Err(err) => degrade(&err),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/content-versions?product=&fullPath=
// ─────────────────────────────────────────────────────────────────────────────

pub async fn content_versions(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let pairs = query_pairs(&query);
    let product = pairs
        .iter()
        .find(|(key, _)| key == "product")
        .map(|(_, value)| normalize_slug(value).to_owned());
    let full_path = pairs
        .iter()
        .find(|(key, _)| key == "fullPath")
        .map(|(_, value)| value.clone());

    let Some(product) = product else {
        return (StatusCode::BAD_REQUEST, MISSING_PRODUCT_PARAM).into_response();
    };
    let Some(full_path) = full_path else {
        return (StatusCode::BAD_REQUEST, MISSING_FULL_PATH_PARAM).into_response();
    };

    if !state.registry.contains(&product) {
        return degrade(&Error::UnknownProduct { slug: product });
    }

    let versions = find_doc_versions(
        &state.registry,
        &state.manifest,
        &state.store,
        &product,
        &full_path,
    );

    // An empty array rather than a 404 when nothing matches; this mirrors
    // the content API this route replaced.
    Json(json!({ "versions": versions })).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /api/all-docs-paths?products=a&products=b
// ─────────────────────────────────────────────────────────────────────────────

pub async fn all_docs_paths(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let mut slugs: Vec<String> = query_pairs(&query)
        .into_iter()
        .filter(|(key, _)| key == "products")
        .map(|(_, value)| normalize_slug(&value).to_owned())
        .collect();

    if slugs.is_empty() {
        slugs = state
            .registry
            .slugs()
            .into_iter()
            .map(str::to_owned)
            .collect();
    }

    match state
        .docs_paths
        .paths_for(&slugs, &state.registry, &state.manifest)
    {
        Ok(entries) => Json(json!({ "result": entries })).into_response(),
        Err(err) => degrade(&err),
    }
}
