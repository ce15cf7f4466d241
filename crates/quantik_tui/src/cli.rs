//! Command-line interface for the Quantik client.

use clap::Parser;
use std::path::PathBuf;

/// Quantik - play against a remote engine from the terminal
#[derive(Parser, Debug)]
#[command(name = "quantik")]
#[command(about = "Terminal client for a remote Quantik engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the client configuration file (defaults are used if absent)
    #[arg(short, long, default_value = "quantik_client.toml")]
    pub config: PathBuf,

    /// Engine URL, overrides the configuration file and environment
    #[arg(long)]
    pub server_url: Option<String>,
}
