//! Doc-version finding: the ordered set of versions in which a document
//! exists, used to populate version switchers.
//!
//! Callers pass a full site path (e.g. `cdktf/api-reference/python/classes`);
//! the on-disk layout is rooted one level below the product's base path, so
//! the matching prefix is stripped before testing file existence.

use crate::locate::{staged_version, ContentStore};
use crate::versions::VersionManifest;
use domain::product::ProductRegistry;
use domain::version::cmp_versions;
use tracing::error;

/// Versions of `slug` that contain the document at `full_path`, ascending by
/// the product's natural version ordering. Never fails: an unknown product
/// or a document found nowhere yields an empty vec, matching the historical
/// content-API contract.
pub fn find_doc_versions(
    registry: &ProductRegistry,
    manifest: &VersionManifest,
    store: &ContentStore,
    slug: &str,
    full_path: &str,
) -> Vec<String> {
    let Some(config) = registry.lookup(slug) else {
        error!("Product, {slug}, not found in docs paths");
        return Vec::new();
    };

    // Tolerate `doc#<path>` style fragments from older callers.
    let path = full_path
        .split_once('#')
        .map(|(_, rest)| rest)
        .unwrap_or(full_path);
    let relative = strip_base_path(path, &config.base_paths);

    let mut found: Vec<String> = Vec::new();
    for meta in manifest.versions_of(slug) {
        let version_dir = staged_version(meta);
        let base = [
            "content".to_owned(),
            slug.to_owned(),
            version_dir,
            config.content_dir.clone(),
        ];

        // Extension-insensitive: the path as given, with `.mdx` appended,
        // and the index form for category pages.
        let candidates: Vec<String> = if relative.is_empty() {
            vec!["index.mdx".to_owned()]
        } else {
            vec![
                relative.to_owned(),
                format!("{relative}.mdx"),
                format!("{relative}/index.mdx"),
            ]
        };

        let hit = candidates.iter().any(|candidate| {
            let mut segments = base.to_vec();
            segments.push(candidate.clone());
            store.file_exists(&segments)
        });
        if hit && !found.contains(&meta.version) {
            found.push(meta.version.clone());
        }
    }

    found.sort_by(|a, b| cmp_versions(a, b));
    found
}

/// Strip the longest matching base-path prefix plus separator.
fn strip_base_path<'a>(path: &'a str, base_paths: &[String]) -> &'a str {
    let matched = base_paths
        .iter()
        .filter(|base| path == base.as_str() || path.starts_with(&format!("{base}/")))
        .max_by_key(|base| base.len());
    match matched {
        Some(base) => path[base.len()..].trim_start_matches('/'),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::ContentStore;
    use domain::version::{ReleaseStage, VersionMetadata};
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stub").unwrap();
    }

    fn manifest_with(slug: &str, versions: &[(&str, bool)]) -> VersionManifest {
        let mut products = HashMap::new();
        products.insert(
            slug.to_owned(),
            versions
                .iter()
                .map(|(v, latest)| VersionMetadata::new(*v, *latest, ReleaseStage::stable()))
                .collect(),
        );
        VersionManifest::new(products)
    }

    #[test]
    fn returns_only_versions_holding_the_document() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/terraform-cdk/v0.20.x/docs/api-reference/python.mdx",
        );
        // v0.21.x exists but does not have the document.
        write(dir.path(), "content/terraform-cdk/v0.21.x/docs/other.mdx");

        let registry = ProductRegistry::builtin();
        let manifest = manifest_with("terraform-cdk", &[("v0.20.x", false), ("v0.21.x", true)]);
        let store = ContentStore::new(dir.path(), dir.path());

        let versions = find_doc_versions(
            &registry,
            &manifest,
            &store,
            "terraform-cdk",
            "cdktf/api-reference/python",
        );
        assert_eq!(versions, vec!["v0.20.x"]);
    }

    #[test]
    fn versions_come_back_ascending() {
        let dir = TempDir::new().unwrap();
        for version in ["v1.8.x", "v1.9.x", "v1.10.x"] {
            write(
                dir.path(),
                &format!("content/terraform/{version}/docs/cli/plan.mdx"),
            );
        }

        let registry = ProductRegistry::builtin();
        // Deliberately unsorted manifest order.
        let manifest = manifest_with(
            "terraform",
            &[("v1.10.x", true), ("v1.8.x", false), ("v1.9.x", false)],
        );
        let store = ContentStore::new(dir.path(), dir.path());

        let versions =
            find_doc_versions(&registry, &manifest, &store, "terraform", "cli/plan");
        assert_eq!(versions, vec!["v1.8.x", "v1.9.x", "v1.10.x"]);
    }

    #[test]
    fn unknown_product_yields_empty() {
        let dir = TempDir::new().unwrap();
        let registry = ProductRegistry::builtin();
        let manifest = VersionManifest::default();
        let store = ContentStore::new(dir.path(), dir.path());
        assert!(find_doc_versions(&registry, &manifest, &store, "vault", "docs/x").is_empty());
    }

    #[test]
    fn absent_document_yields_empty() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/terraform/v1.9.x/docs/cli/plan.mdx");
        let registry = ProductRegistry::builtin();
        let manifest = manifest_with("terraform", &[("v1.9.x", true)]);
        let store = ContentStore::new(dir.path(), dir.path());
        assert!(
            find_doc_versions(&registry, &manifest, &store, "terraform", "cli/apply").is_empty()
        );
    }

    #[test]
    fn doc_fragment_prefix_is_tolerated() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/terraform/v1.9.x/docs/internals/graph.mdx");
        let registry = ProductRegistry::builtin();
        let manifest = manifest_with("terraform", &[("v1.9.x", true)]);
        let store = ContentStore::new(dir.path(), dir.path());
        let versions = find_doc_versions(
            &registry,
            &manifest,
            &store,
            "terraform",
            "doc#internals/graph",
        );
        assert_eq!(versions, vec!["v1.9.x"]);
    }

    #[test]
    fn index_form_matches_category_pages() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/terraform-cdk/v0.20.x/docs/api-reference/index.mdx",
        );
        let registry = ProductRegistry::builtin();
        let manifest = manifest_with("terraform-cdk", &[("v0.20.x", true)]);
        let store = ContentStore::new(dir.path(), dir.path());
        let versions = find_doc_versions(
            &registry,
            &manifest,
            &store,
            "terraform-cdk",
            "cdktf/api-reference",
        );
        assert_eq!(versions, vec!["v0.20.x"]);
    }

    #[test]
    fn strip_base_path_prefers_the_longest_prefix() {
        let bases = vec!["cloud-docs".to_owned(), "cloud-docs/agents".to_owned()];
        assert_eq!(strip_base_path("cloud-docs/agents/install", &bases), "install");
        assert_eq!(strip_base_path("unrelated/path", &bases), "unrelated/path");
        assert_eq!(strip_base_path("cloud-docs/agents", &bases), "");
    }
}
