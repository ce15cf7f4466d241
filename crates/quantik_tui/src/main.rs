//! Quantik - terminal client for a remote Quantik engine.

#![warn(missing_docs)]

mod app;
mod cli;
mod input;
mod tui;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use cli::Cli;
use quantik_client::{ClientConfig, HttpMoveService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ClientConfig::load(&cli.config)?;
    if let Some(server_url) = cli.server_url {
        config = config.with_server_url(server_url);
    }

    // Log to a file so output does not interfere with the terminal UI
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %config.server_url(), "Connecting to engine");

    let service = HttpMoveService::new(&config)?;
    let app = App::new(
        Arc::new(service),
        *config.analysis_depth(),
        *config.board_size(),
    );
    tui::run_tui(app).await
}
