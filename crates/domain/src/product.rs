//! Product registry: the load-once table mapping a documentation repo slug to
//! its content layout. Constructed once at startup and passed by reference
//! into the resolution core; never mutated afterwards.

use serde::Serialize;

/// Content layout for a single documentation repo.
#[derive(Debug, Clone, Serialize)]
pub struct ProductConfig {
    /// Parent product the repo publishes under (e.g. `terraform` for
    /// `terraform-cdk`).
    pub product_slug: String,

    /// URL prefixes owned by this repo on the website. Callers supplying a
    /// full site path (e.g. `cdktf/api-reference/python`) have the matching
    /// prefix stripped before on-disk lookup.
    pub base_paths: Vec<String>,

    /// Whether the repo publishes multiple release directories. Repos with
    /// `false` have exactly one implicit version rooted directly under the
    /// product directory.
    pub versioned_docs: bool,

    /// Subdirectory of a version root holding document files.
    pub content_dir: String,

    /// Subdirectory of a version root holding nav-data JSON.
    pub data_dir: String,

    /// Subdirectory of a version root holding image assets. May be empty for
    /// repos that ship none.
    pub asset_dir: String,
}

/// Immutable slug → `ProductConfig` table.
///
/// Lookup order matters only for `slugs()`, which drives the
/// supported-products listing; a dozen entries keeps linear scan fine.
#[derive(Debug)]
pub struct ProductRegistry {
    entries: Vec<(String, ProductConfig)>,
}

impl ProductRegistry {
    pub fn new(entries: Vec<(String, ProductConfig)>) -> Self {
        Self { entries }
    }

    /// The registry of every repo this API serves.
    pub fn builtin() -> Self {
        fn entry(
            slug: &str,
            product_slug: &str,
            base_paths: &[&str],
            versioned_docs: bool,
            asset_dir: &str,
        ) -> (String, ProductConfig) {
            (
                slug.to_owned(),
                ProductConfig {
                    product_slug: product_slug.to_owned(),
                    base_paths: base_paths.iter().map(|s| (*s).to_owned()).collect(),
                    versioned_docs,
                    content_dir: "docs".to_owned(),
                    data_dir: "data".to_owned(),
                    asset_dir: asset_dir.to_owned(),
                },
            )
        }

        Self::new(vec![
            entry(
                "terraform-enterprise",
                "terraform",
                &["enterprise"],
                true,
                "img",
            ),
            entry(
                "terraform",
                "terraform",
                &["cli", "internals", "intro", "language"],
                true,
                "img",
            ),
            entry("terraform-migrate", "terraform", &["migrate"], true, "img"),
            // terraform-cdk has no asset directory in any published version.
            entry("terraform-cdk", "terraform", &["cdktf"], true, ""),
            entry(
                "terraform-docs-agents",
                "terraform",
                &["cloud-docs/agents"],
                true,
                "img",
            ),
            entry("terraform-docs-common", "terraform", &[], false, "img"),
            entry(
                "terraform-plugin-framework",
                "terraform",
                &["plugin/framework"],
                true,
                "img",
            ),
            entry(
                "terraform-plugin-log",
                "terraform",
                &["plugin/log"],
                true,
                "img",
            ),
            entry(
                "terraform-plugin-mux",
                "terraform",
                &["plugin/mux"],
                true,
                "img",
            ),
            entry(
                "terraform-plugin-sdk",
                "terraform",
                &["plugin/sdkv2"],
                true,
                "img",
            ),
            entry(
                "terraform-plugin-testing",
                "terraform",
                &["plugin/testing"],
                true,
                "img",
            ),
            entry(
                "well-architected-framework",
                "well-architected-framework",
                &[],
                false,
                "img",
            ),
        ])
    }

    /// Pure read; the registry is alias-agnostic, so callers apply
    /// [`normalize_slug`] before looking up request-supplied slugs.
    pub fn lookup(&self, slug: &str) -> Option<&ProductConfig> {
        self.entries
            .iter()
            .find(|(key, _)| key == slug)
            .map(|(_, config)| config)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.lookup(slug).is_some()
    }

    /// Registered slugs in registry order.
    pub fn slugs(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }
}

/// Rewrite the legacy `ptfe-releases` slug to `terraform-enterprise`.
///
/// Every entry point that accepts a product slug from a request applies this
/// exactly once before registry or manifest lookup.
pub fn normalize_slug(slug: &str) -> &str {
    if slug == "ptfe-releases" {
        "terraform-enterprise"
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_returns_layout() {
        let registry = ProductRegistry::builtin();
        let config = registry.lookup("terraform").expect("terraform registered");
        assert_eq!(config.content_dir, "docs");
        assert_eq!(
            config.base_paths,
            vec!["cli", "internals", "intro", "language"]
        );
        assert!(config.versioned_docs);
    }

    #[test]
    fn builtin_unversioned_products() {
        let registry = ProductRegistry::builtin();
        for slug in ["terraform-docs-common", "well-architected-framework"] {
            let config = registry.lookup(slug).unwrap();
            assert!(!config.versioned_docs, "{slug} should be unversioned");
        }
    }

    #[test]
    fn lookup_is_alias_agnostic() {
        let registry = ProductRegistry::builtin();
        assert!(registry.lookup("ptfe-releases").is_none());
        assert!(registry.lookup("terraform-enterprise").is_some());
    }

    #[test]
    fn normalize_slug_rewrites_only_the_legacy_name() {
        assert_eq!(normalize_slug("ptfe-releases"), "terraform-enterprise");
        assert_eq!(normalize_slug("terraform-enterprise"), "terraform-enterprise");
        assert_eq!(normalize_slug("vault"), "vault");
    }

    #[test]
    fn slugs_preserve_registry_order() {
        let registry = ProductRegistry::builtin();
        let slugs = registry.slugs();
        assert_eq!(slugs.first(), Some(&"terraform-enterprise"));
        assert!(slugs.contains(&"terraform-cdk"));
        assert_eq!(slugs.len(), 12);
    }
}
