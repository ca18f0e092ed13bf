#![allow(clippy::collapsible_if)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
mod shared;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries and integration tests)
pub use app::App;
pub use config::PERSISTENCE;
pub use engine::{CycleOutcome, DashboardEngine};
pub use shared::{SharedIdentity, SubscriptionId};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON key-value file holding theme, query, username and history
    #[arg(long)]
    pub state_path: Option<PathBuf>,

    /// Market data API base URL (defaults to the public CoinGecko v3 endpoint)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Directory the Export CSV button writes into
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<App> {
    App::new(cc, args)
}
