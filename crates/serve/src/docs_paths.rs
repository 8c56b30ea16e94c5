//! Docs-paths index: the pre-generated listing of every document path per
//! product and version, consumed by the all-docs-paths route and by the doc
//! route's created-at metadata.

use crate::versions::VersionManifest;
use crate::{Error, Result};
use domain::product::ProductRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::error;

/// One known document. Field names mirror the generated JSON (`itemPath` is
/// camelCase, `created_at` is not — the generator is inconsistent and the
/// wire format is frozen).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocsPathEntry {
    pub path: String,
    #[serde(rename = "itemPath")]
    pub item_path: String,
    pub created_at: String,
}

/// Product slug → version directory → entries. Loaded once at startup.
#[derive(Debug, Default)]
pub struct DocsPathsIndex {
    products: HashMap<String, HashMap<String, Vec<DocsPathEntry>>>,
}

impl DocsPathsIndex {
    pub fn new(products: HashMap<String, HashMap<String, Vec<DocsPathEntry>>>) -> Self {
        Self { products }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|_| Error::FileNotFound {
            path: path.display().to_string(),
        })?;
        let products =
            serde_json::from_str(&text).map_err(|e| Error::JsonParse(e.to_string()))?;
        Ok(Self::new(products))
    }

    /// Latest-version docs paths for each requested slug, concatenated.
    /// Per-product misses are logged and skipped; only a total miss fails.
    pub fn paths_for(
        &self,
        slugs: &[String],
        registry: &ProductRegistry,
        manifest: &VersionManifest,
    ) -> Result<Vec<DocsPathEntry>> {
        let mut out = Vec::new();
        for slug in slugs {
            let meta = match manifest.resolve(registry, slug, "latest") {
                Ok(meta) => meta,
                Err(err) => {
                    error!("API Error: {err}");
                    continue;
                }
            };

            let versioned = registry
                .lookup(slug)
                .map(|config| config.versioned_docs)
                .unwrap_or(true);
            let key = if !versioned {
                // Unversioned products are indexed under their placeholder
                // version.
                "v0.0.x".to_owned()
            } else if !meta.release_stage.is_stable() {
                format!("{} ({})", meta.version, meta.release_stage.as_str())
            } else {
                meta.version.clone()
            };

            match self.products.get(slug).and_then(|byver| byver.get(&key)) {
                Some(entries) => out.extend(entries.iter().cloned()),
                None => {
                    error!("Product, {slug}, version {key}, not found in docs paths");
                }
            }
        }

        if out.is_empty() {
            return Err(Error::MissingDocsPaths);
        }
        Ok(out)
    }

    /// Created-at timestamp for the entry whose `path` ends with `docs_path`.
    pub fn created_at(&self, slug: &str, version_dir: &str, docs_path: &str) -> Option<&str> {
        self.products
            .get(slug)?
            .get(version_dir)?
            .iter()
            .find(|entry| entry.path.ends_with(docs_path))
            .map(|entry| entry.created_at.as_str())
    }

    /// Whether the index has any entries for (slug, version_dir).
    pub fn has_version(&self, slug: &str, version_dir: &str) -> bool {
        self.products
            .get(slug)
            .and_then(|byver| byver.get(version_dir))
            .is_some()
    }
}
