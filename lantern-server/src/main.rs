//! lantern: Jira dashboard server with Confluence summaries.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use lantern_core::DashboardConfig;
use lantern_server::{AppState, build_router};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Dashboard server projecting Jira search results into configurable table columns")]
struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  verbose: u8,

  /// Path to a TOML config file (defaults to $LANTERN_CONFIG, then the user config dir)
  #[arg(short = 'c', long = "config", value_name = "PATH")]
  config: Option<PathBuf>,

  /// Address to bind (overrides LANTERN_HOST)
  #[arg(long = "host", value_name = "HOST")]
  host: Option<String>,

  /// Port to listen on (overrides LANTERN_PORT)
  #[arg(short = 'p', long = "port", value_name = "PORT")]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let level = match cli.verbose {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  let mut config = match DashboardConfig::load(cli.config.as_deref()) {
    Ok(config) => config,
    Err(err) => {
      error!("Invalid configuration: {}", err);
      return Err(err).context("Failed to load configuration");
    }
  };
  if let Some(host) = cli.host {
    config.server.host = host;
  }
  if let Some(port) = cli.port {
    config.server.port = port;
  }

  let host = config.server.host.clone();
  let port = config.server.port;

  info!(
    jira = %config.jira.base_url,
    columns = config.columns.len(),
    development = config.server.development,
    "Starting lantern"
  );

  let state = Arc::new(AppState::new(config));
  let app = build_router(state);

  let listener = TcpListener::bind((host.as_str(), port))
    .await
    .with_context(|| format!("Failed to bind {host}:{port}"))?;
  let addr = listener.local_addr().context("Failed to read listen address")?;
  info!("Listening on http://{}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

  info!("Shut down cleanly");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    error!("Failed to listen for shutdown signal: {}", err);
    std::future::pending::<()>().await;
  }
  info!("Shutdown signal received");
}
