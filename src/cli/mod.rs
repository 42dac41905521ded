//! CLI module — command parsing and dispatch
//!
//! All CLI logic lives here. `main.rs` calls `cli::run()`.

pub mod agent;
pub mod config;
pub mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "echoclaw")]
#[command(version)]
#[command(about = "Voice-driven coding agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a voice session (the default when no subcommand is given)
    Run {
        /// Type requests instead of speaking them (no microphone needed)
        #[arg(long)]
        text: bool,
        /// Load configuration from a specific file
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },
    /// List the built-in tools
    Tools,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration as JSON
    Show,
    /// Print the configuration file path
    Path,
}

/// Entry point for the CLI — called from main().
pub async fn run() -> Result<()> {
    // Pick up GROQ_API_KEY and friends from a local .env if present.
    dotenvy::dotenv().ok();

    // Initialize logging from config (format, level, optional file output).
    // Load config early so we can respect the logging settings; fall back to
    // defaults if the config file is missing or unreadable.
    let logging_cfg = echoclaw::config::Config::load()
        .map(|c| c.logging)
        .unwrap_or_default();
    echoclaw::utils::logging::init_logging(&logging_cfg);

    let cli = Cli::parse();

    match cli.command {
        None => agent::cmd_run(false, None).await,
        Some(Commands::Run { text, config }) => agent::cmd_run(text, config).await,
        Some(Commands::Tools) => tools::cmd_tools(),
        Some(Commands::Config { action }) => config::cmd_config(action),
    }
}
