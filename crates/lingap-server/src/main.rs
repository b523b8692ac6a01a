//! lingap server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the applicant registry API over HTTP.
//!
//! # Seeding
//!
//! To load the sample roster once at deployment setup:
//!
//! ```
//! lingap --config config.toml seed
//! ```
//!
//! Seeding is explicit and idempotent — a program that already has records
//! is left untouched.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lingap_api::ApiState;
use lingap_notify::{NoopNotifier, SmtpConfig, SmtpNotifier, StatusNotifier};
use lingap_store_sqlite::{SqliteStore, seed};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `LINGAP_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  host:       String,
  port:       u16,
  store_path: PathBuf,
  /// Absent means notifications are accepted but not sent (no-op).
  smtp:       Option<SmtpConfig>,
}

// ─── CLI ─────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Lingap applicant registry server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Insert the sample roster for any program with no records, then exit.
  Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("LINGAP"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path and open the store.
  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: seed sample data and exit.
  if let Some(Command::Seed) = cli.command {
    let created = seed::seed(&store).await.context("seeding failed")?;
    tracing::info!(created, "seed complete");
    return Ok(());
  }

  // Notifications are a no-op until SMTP is configured.
  let notifier: Arc<dyn StatusNotifier> = match server_cfg.smtp.clone() {
    Some(smtp) => Arc::new(SmtpNotifier::new(smtp)),
    None => Arc::new(NoopNotifier),
  };
  tracing::info!(notifier = notifier.name(), "notifier selected");

  let state = ApiState { store: Arc::new(store), notifier };

  let app = axum::Router::new()
    .nest("/api", lingap_api::api_router(state))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
