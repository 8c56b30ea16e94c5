use serde::Deserialize;
use std::{net::IpAddr, path::PathBuf};

fn default_ip() -> IpAddr {
    IpAddr::from([127, 0, 0, 1])
}

fn default_port() -> u16 {
    8080
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_version_manifest() -> PathBuf {
    PathBuf::from("app/api/versionMetadata.json")
}

fn default_docs_paths() -> PathBuf {
    PathBuf::from("app/api/docsPathsAllVersions.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// IP address the API listener binds.
    #[serde(default = "default_ip")]
    pub ip: IpAddr,

    /// API port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve text content from the raw authored tree instead of the prebuilt
    /// output tree. Local development only; production leaves this unset.
    #[serde(default)]
    pub load_from_content_dir: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            port: default_port(),
            load_from_content_dir: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentSettings {
    /// Prebuilt output tree: `<public_dir>/content/...` and
    /// `<public_dir>/assets/...`.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Raw authored tree, used when `load_from_content_dir` is set.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Pre-generated version manifest keyed by product slug.
    #[serde(default = "default_version_manifest")]
    pub version_manifest: PathBuf,

    /// Pre-generated docs-paths listing keyed by product slug and version.
    #[serde(default = "default_docs_paths")]
    pub docs_paths: PathBuf,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            content_dir: default_content_dir(),
            version_manifest: default_version_manifest(),
            docs_paths: default_docs_paths(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub content: ContentSettings,
}
