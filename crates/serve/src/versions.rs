//! Version manifest loading and version resolution.
//!
//! The manifest is the authoritative, pre-generated list of existing versions
//! per product. It is read once at startup and shared read-only for the life
//! of the process; staleness cannot outlive a restart.

use crate::{Error, Result};
use domain::product::ProductRegistry;
use domain::version::VersionMetadata;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Product slug → ordered version metadata, as emitted by the
/// gather-version-metadata build step.
#[derive(Debug, Default)]
pub struct VersionManifest {
    products: HashMap<String, Vec<VersionMetadata>>,
}

impl VersionManifest {
    pub fn new(products: HashMap<String, Vec<VersionMetadata>>) -> Self {
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

    /// Resolve a requested version token to concrete release metadata.
    ///
    /// `latest` selects the entry marked latest. Products without versioned
    /// docs resolve every token to their single implicit release, with the
    /// `version` field emptied so no version path component is emitted when
    /// locating files.
    pub fn resolve(
        &self,
        registry: &ProductRegistry,
        slug: &str,
        requested: &str,
    ) -> Result<VersionMetadata> {
        let entries = self
            .products
            .get(slug)
            .ok_or_else(|| Error::UnknownManifestProduct { slug: slug.into() })?;

        let versioned = registry
            .lookup(slug)
            .map(|config| config.versioned_docs)
            .unwrap_or(true);

        let found = if requested == "latest" || !versioned {
            entries
                .iter()
                .find(|meta| meta.is_latest)
                .ok_or_else(|| Error::NoLatestVersion { slug: slug.into() })?
        } else {
            entries
                .iter()
                .find(|meta| meta.version == requested)
                .ok_or_else(|| Error::UnknownVersion {
                    slug: slug.into(),
                    version: requested.into(),
                })?
        };

        let mut resolved = found.clone();
        if !versioned {
            resolved.version = String::new();
        }
        Ok(resolved)
    }

    /// The full ordered metadata list for a product.
    pub fn metadata_for(&self, slug: &str) -> Result<&[VersionMetadata]> {
        self.products
            .get(slug)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownManifestProduct { slug: slug.into() })
    }

    /// Every concrete version of a product; empty for unknown slugs.
    pub fn versions_of(&self, slug: &str) -> &[VersionMetadata] {
        self.products.get(slug).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::version::ReleaseStage;

    fn manifest() -> VersionManifest {
        let mut products = HashMap::new();
        products.insert(
            "terraform".to_owned(),
            vec![
                VersionMetadata::new("v1.8.x", false, ReleaseStage::stable()),
                VersionMetadata::new("v1.9.x", true, ReleaseStage::stable()),
            ],
        );
        products.insert(
            "terraform-docs-common".to_owned(),
            vec![VersionMetadata::new("v0.0.x", true, ReleaseStage::stable())],
        );
        products.insert(
            "terraform-enterprise".to_owned(),
            vec![
                VersionMetadata::new("v20220610-01", false, ReleaseStage::stable()),
                VersionMetadata::new("v20230510-01", true, ReleaseStage::stable()),
            ],
        );
        VersionManifest::new(products)
    }

    #[test]
    fn latest_selects_the_marked_entry() {
        let resolved = manifest()
            .resolve(&ProductRegistry::builtin(), "terraform", "latest")
            .unwrap();
        assert_eq!(resolved.version, "v1.9.x");
        assert!(resolved.is_latest);
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        let registry = ProductRegistry::builtin();
        let manifest = manifest();
        assert_eq!(
            manifest
                .resolve(&registry, "terraform", "v1.8.x")
                .unwrap()
                .version,
            "v1.8.x"
        );
        assert!(matches!(
            manifest.resolve(&registry, "terraform", "V1.8.X"),
            Err(Error::UnknownVersion { .. })
        ));
    }

    #[test]
    fn unknown_version_reports_slug_and_token() {
        let err = manifest()
            .resolve(&ProductRegistry::builtin(), "terraform", "v9.9.x")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product, terraform, has no \"v9.9.x\" version"
        );
    }

    #[test]
    fn unknown_product_fails_before_version_matching() {
        assert!(matches!(
            manifest().resolve(&ProductRegistry::builtin(), "vault", "latest"),
            Err(Error::UnknownManifestProduct { .. })
        ));
    }

    #[test]
    fn no_latest_marked_is_an_error() {
        let mut products = HashMap::new();
        products.insert(
            "terraform".to_owned(),
            vec![VersionMetadata::new("v1.8.x", false, ReleaseStage::stable())],
        );
        let err = VersionManifest::new(products)
            .resolve(&ProductRegistry::builtin(), "terraform", "latest")
            .unwrap_err();
        assert!(matches!(err, Error::NoLatestVersion { .. }));
    }

    #[test]
    fn unversioned_products_resolve_every_token_to_the_implicit_release() {
        let registry = ProductRegistry::builtin();
        let manifest = manifest();
        for token in ["latest", "v0.0.x", "v99.0.x"] {
            let resolved = manifest
                .resolve(&registry, "terraform-docs-common", token)
                .unwrap();
            assert_eq!(resolved.version, "");
            assert!(resolved.is_latest);
        }
    }

    #[test]
    fn dated_versions_resolve_exactly() {
        let resolved = manifest()
            .resolve(
                &ProductRegistry::builtin(),
                "terraform-enterprise",
                "v20220610-01",
            )
            .unwrap();
        assert_eq!(resolved.version, "v20220610-01");
        assert!(!resolved.is_latest);
    }
}
