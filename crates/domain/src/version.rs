//! Release metadata for a (product, version) pair, plus the version ordering
//! used wherever a list of versions is surfaced to callers.
//!
//! Nearly all documentation is semver-versioned (`v1.9.x`); Terraform
//! Enterprise uses dated build identifiers (`v20220610-01`). Rather than two
//! orderings, dated identifiers are coerced into a year/month/patch triple so
//! a single ascending comparison covers both.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Release stage as recorded in the version manifest.
///
/// The manifest treats this as an open string set (`stable`, `alpha`, `beta`,
/// `rc1`, ...); only `stable` carries special meaning, so the value is kept
/// verbatim rather than enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseStage(String);

impl ReleaseStage {
    pub fn new(stage: impl Into<String>) -> Self {
        Self(stage.into())
    }

    pub fn stable() -> Self {
        Self::new("stable")
    }

    pub fn is_stable(&self) -> bool {
        self.0 == "stable"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One entry of the version manifest: a concrete release directory and its
/// release metadata. At most one entry per product carries `is_latest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    /// Concrete directory name, e.g. `v1.9.x` or `v20220610-01`. Empty for
    /// the implicit version of unversioned products after resolution.
    pub version: String,
    pub is_latest: bool,
    pub release_stage: ReleaseStage,
}

impl VersionMetadata {
    pub fn new(version: impl Into<String>, is_latest: bool, release_stage: ReleaseStage) -> Self {
        Self {
            version: version.into(),
            is_latest,
            release_stage,
        }
    }
}

fn dated_version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v(\d{4})(\d{2})-(\d+)$").expect("valid regex"))
}

/// Coerce a version directory name into a sortable triple.
///
/// Dated builds map to (year, month, patch); semver-style names map to
/// (major, minor, patch) with `x`/`*`/missing components treated as zero.
/// Unparseable names sort first.
pub fn version_sort_key(version: &str) -> (u64, u64, u64) {
    if let Some(caps) = dated_version_re().captures(version) {
        let part = |i| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .unwrap_or(0)
        };
        return (part(1), part(2), part(3));
    }

    let bare = version.strip_prefix('v').unwrap_or(version);
    let mut parts = bare.split('.').map(|part| {
        // "1" -> 1; "x", "*", "0-alpha..." -> leading digits or zero
        let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
        digits.parse::<u64>().unwrap_or(0)
    });
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

/// Ascending natural version order; ties broken lexically so sorting is total
/// and deterministic.
pub fn cmp_versions(a: &str, b: &str) -> Ordering {
    version_sort_key(a)
        .cmp(&version_sort_key(b))
        .then_with(|| a.cmp(b))
}
