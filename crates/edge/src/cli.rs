// crates/edge/src/cli.rs

use crate::app::{build_app, AppState};
use crate::Error;

use clap::{builder::ValueHint, Parser, Subcommand};
use domain::product::ProductRegistry;
use domain::setting::Settings;
use serve::docs_paths::DocsPathsIndex;
use serve::locate::ContentStore;
use serve::versions::VersionManifest;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

pub type Result<T> = std::result::Result<T, Error>;

/// Unified docs API — command line entry point.
#[tokio::main(flavor = "multi_thread")]
#[tracing::instrument(skip_all)]
pub async fn start() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start(start) => do_start(start).await,
    };

    result.map_or_else(
        |e| {
            error!("Failed to start unified docs API: {}", e);
            ExitCode::FAILURE
        },
        |_| ExitCode::SUCCESS,
    )
}

#[tracing::instrument(skip_all)]
async fn do_start(start: StartCmd) -> Result<()> {
    let settings = load_settings(&start)?;
    info!(?settings, "settings loaded");

    let registry = Arc::new(ProductRegistry::builtin());
    let manifest = Arc::new(VersionManifest::from_file(
        &settings.content.version_manifest,
    )?);
    let docs_paths = Arc::new(DocsPathsIndex::from_file(&settings.content.docs_paths)?);
    let store = Arc::new(ContentStore::new(
        settings.content.public_dir.clone(),
        settings.content.content_dir.clone(),
    ));

    let state = AppState {
        registry,
        manifest,
        store,
        docs_paths,
        load_from_content_dir: settings.server.load_from_content_dir,
    };
    let app = build_app(state);

    let addr = SocketAddr::new(settings.server.ip, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Layered settings: optional TOML file, then `UDOCS_*` environment
/// overrides (e.g. `UDOCS_SERVER__PORT=3001`), then serde defaults.
fn load_settings(start: &StartCmd) -> Result<Settings> {
    let mut builder = config::Config::builder();
    if let Some(path) = &start.config {
        builder = builder.add_source(config::File::from(path.as_path()));
    }
    let cfg = builder
        .add_source(config::Environment::with_prefix("UDOCS").separator("__"))
        .build()?;
    Ok(cfg.try_deserialize()?)
}

#[derive(Parser, Debug)]
#[command(name = "unified-docs", version, about = "Versioned documentation content API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API using the specified settings file
    Start(StartCmd),
}

#[derive(Parser, Debug)]
pub struct StartCmd {
    /// Path to a TOML settings file; omit to run on defaults + environment
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}
