//! Paper Editor command line
//!
//! Loads configuration, initializes logging and runs one subcommand.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use paper_editor::commands::{ReplayCommand, StashSetCommand, StashShowCommand};
use paper_editor::core::{AppConfig, EditMode, APP_NAME, VERSION};

#[derive(Parser, Debug)]
#[command(name = "paper-editor", version, about = "Question paper editing engine")]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Editing mode for this run (manual or ai), overriding the configured default
    #[arg(long, global = true)]
    mode: Option<EditMode>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Apply a JSON array of editor commands and print the resulting paper
    Replay { script: PathBuf },
    /// Inspect or change the stored paper details
    Stash {
        #[command(subcommand)]
        action: StashAction,
    },
}

#[derive(Subcommand, Debug)]
enum StashAction {
    /// Print the stored paper details
    Show,
    /// Replace the stored paper details with a JSON value
    Set { json: String },
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{} v{} starting...", APP_NAME, VERSION);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path).await?,
        None => AppConfig::load().await?,
    };
    if let Some(mode) = cli.mode {
        config.editor.default_mode = mode;
    }

    match cli.command {
        CliCommand::Replay { script } => {
            let summary = ReplayCommand { script }.execute(config).await?;
            if !summary.failed.is_empty() {
                std::process::exit(1);
            }
        }
        CliCommand::Stash { action } => match action {
            StashAction::Show => StashShowCommand.execute(config)?,
            StashAction::Set { json } => StashSetCommand { json }.execute(config)?,
        },
    }

    Ok(())
}
