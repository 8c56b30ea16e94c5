pub mod doc_versions;
pub mod docs_paths;
pub mod front_matter;
pub mod locate;
pub mod transform;
pub mod versions;

use http::StatusCode;
use std::io;
use thiserror::Error;

/// Every fallible lookup in the resolution core reports through this enum;
/// nothing panics across the crate boundary. Message texts are part of the
/// observable contract — operators grep logs for them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Product, {slug}, not found in contentDirMap")]
    UnknownProduct { slug: String },

    #[error("Product, {slug}, not found in version metadata")]
    UnknownManifestProduct { slug: String },

    #[error("Product, {slug}, has no \"{version}\" version")]
    UnknownVersion { slug: String, version: String },

    #[error("Product, {slug}, has no version marked latest")]
    NoLatestVersion { slug: String },

    #[error("Failed to read file at path: {path}")]
    FileNotFound { path: String },

    #[error("Path escapes content root: {path}")]
    PathTraversal { path: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(String),

    #[error("Failed to parse front matter: {0}")]
    FrontMatter(String),

    #[error("All docs paths not found")]
    MissingDocsPaths,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// HTTP status a degraded core failure maps to. Broken authored content
    /// (JSONC/JSON that fails to parse) is a server fault; everything else is
    /// a missing resource.
    pub fn to_status(&self) -> StatusCode {
        match self {
            Error::JsonParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::NOT_FOUND,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_are_server_faults() {
        assert_eq!(
            Error::JsonParse("oops".into()).to_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn lookup_failures_are_not_found() {
        let errors = [
            Error::UnknownProduct { slug: "nope".into() },
            Error::UnknownVersion {
                slug: "terraform".into(),
                version: "v9.9.x".into(),
            },
            Error::NoLatestVersion {
                slug: "terraform".into(),
            },
            Error::FileNotFound {
                path: "content/x".into(),
            },
            Error::PathTraversal {
                path: "../etc/passwd".into(),
            },
        ];
        for error in errors {
            assert_eq!(error.to_status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn messages_match_the_public_log_contract() {
        assert_eq!(
            Error::UnknownProduct { slug: "vault".into() }.to_string(),
            "Product, vault, not found in contentDirMap"
        );
        assert_eq!(
            Error::UnknownVersion {
                slug: "terraform".into(),
                version: "v9.9.x".into(),
            }
            .to_string(),
            "Product, terraform, has no \"v9.9.x\" version"
        );
    }
}
