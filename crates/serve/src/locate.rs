//! File location: logical (product, version, path) → bytes on disk.
//!
//! Two trees exist: the prebuilt output tree (`public_root`, what production
//! serves) and the raw authored tree (`content_root`, local development
//! only). Every read is a single whole-file read; a failure is terminal for
//! the request, no retries.

use crate::{Error, Result};
use domain::version::{ReleaseStage, VersionMetadata};
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only handle on the content trees. Shared across requests; holds no
/// mutable state.
#[derive(Debug, Clone)]
pub struct ContentStore {
    public_root: PathBuf,
    content_root: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocateOptions {
    /// Search the raw authored tree instead of the prebuilt output tree.
    pub load_from_content_dir: bool,
}

/// A located binary asset.
#[derive(Debug)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Version path component for a release: non-stable stages live in suffixed
/// directories, e.g. `v1.10.x (beta)`, written that way by the prebuild step.
pub fn staged_version(meta: &VersionMetadata) -> String {
    if meta.version.is_empty() || meta.release_stage.is_stable() {
        meta.version.clone()
    } else {
        format!("{} ({})", meta.version, meta.release_stage.as_str())
    }
}

/// Join logical segments for display and logging: empty segments dropped,
/// runs of slashes collapsed.
pub fn join_file_path(segments: &[String]) -> String {
    let mut out = String::new();
    for part in segments.iter().flat_map(|s| s.split('/')) {
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(part);
    }
    out
}

/// Minimal builtin extension → content-type map for served assets.
pub fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

impl ContentStore {
    pub fn new(public_root: impl Into<PathBuf>, content_root: impl Into<PathBuf>) -> Self {
        Self {
            public_root: public_root.into(),
            content_root: content_root.into(),
        }
    }

    /// Read a text file addressed by logical segments. The third segment is
    /// the version component and gets the release-stage suffix applied when
    /// the resolved release is not stable.
    pub fn read_text(
        &self,
        segments: &[String],
        meta: &VersionMetadata,
        options: LocateOptions,
    ) -> Result<String> {
        let staged = with_release_stage(segments, &meta.release_stage);
        let root = if options.load_from_content_dir {
            &self.content_root
        } else {
            &self.public_root
        };
        let path = join_under(root, &staged)?;
        fs::read_to_string(&path).map_err(|_| Error::FileNotFound {
            path: join_file_path(&staged),
        })
    }

    /// Read a binary asset and derive its content type from the extension.
    pub fn read_asset(&self, segments: &[String], meta: &VersionMetadata) -> Result<Asset> {
        let staged = with_release_stage(segments, &meta.release_stage);
        let path = join_under(&self.public_root, &staged)?;
        let bytes = fs::read(&path).map_err(|_| Error::FileNotFound {
            path: join_file_path(&staged),
        })?;
        Ok(Asset {
            bytes,
            content_type: content_type_for(&join_file_path(&staged)),
        })
    }

    /// Whether a file exists at the logical location in the prebuilt tree.
    /// Traversal-rejected paths count as absent.
    pub fn file_exists(&self, segments: &[String]) -> bool {
        join_under(&self.public_root, segments)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }
}

/// Apply the release-stage directory suffix to the version component.
/// The version is always the third logical segment; unversioned products
/// carry an empty component there, which stays untouched.
fn with_release_stage(segments: &[String], stage: &ReleaseStage) -> Vec<String> {
    let mut out = segments.to_vec();
    if !stage.is_stable() {
        if let Some(version) = out.get_mut(2) {
            if !version.is_empty() {
                *version = format!("{version} ({})", stage.as_str());
            }
        }
    }
    out
}

/// Join logical segments under `root`, rejecting anything that would escape
/// it. Segments are split on `/` and normalized lexically; an absolute
/// segment or a surviving `..` component fails before any I/O happens.
fn join_under(root: &Path, segments: &[String]) -> Result<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in segments {
        if segment.starts_with('/') {
            return Err(Error::PathTraversal {
                path: join_file_path(segments),
            });
        }
    }
    for part in segments.iter().flat_map(|s| s.split('/')) {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(Error::PathTraversal {
                path: join_file_path(segments),
            });
        }
        path.push(part);
    }
    // Invariant: only plain components were pushed, so the result is a
    // descendant of root.
    debug_assert!(path.starts_with(root));
    Ok(path)
}
