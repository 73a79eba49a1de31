//! CLI commands for the paper editor
//!
//! Provides command-line entry points for scripting edits and inspecting
//! the paper details stash.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use paper_editor_core::AppConfig;
use paper_editor_editor::Command;

use crate::session::{ReplaySummary, Session};

/// Replay a JSON script of editor commands
pub struct ReplayCommand {
    pub script: PathBuf,
}

impl ReplayCommand {
    /// Read the script, apply it to a fresh paper and print the outline
    pub async fn execute(&self, config: AppConfig) -> Result<ReplaySummary> {
        info!("Replaying {:?}", self.script);

        let contents = tokio::fs::read_to_string(&self.script)
            .await
            .with_context(|| format!("Failed to read script {:?}", self.script))?;
        let commands: Vec<Command> = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid command script {:?}", self.script))?;

        let mut session = Session::open(config)?;
        session.mount()?;

        let summary = session.replay(commands);

        print!("{}", session.editor().paper());
        println!();
        println!(
            "{} applied, {} unchanged, {} rejected, {} failed",
            summary.applied,
            summary.unchanged,
            summary.rejected.len(),
            summary.failed.len()
        );
        for (position, reason) in &summary.rejected {
            println!("  rejected #{}: {}", position, reason);
        }
        for (position, error) in &summary.failed {
            println!("  failed #{}: {}", position, error);
        }

        Ok(summary)
    }
}

/// Print the stored paper details
pub struct StashShowCommand;

impl StashShowCommand {
    pub fn execute(&self, config: AppConfig) -> Result<()> {
        let mut session = Session::open(config)?;
        session.mount()?;
        println!("{}", serde_json::to_string_pretty(session.paper_details())?);
        Ok(())
    }
}

/// Replace the stored paper details
pub struct StashSetCommand {
    pub json: String,
}

impl StashSetCommand {
    pub fn execute(&self, config: AppConfig) -> Result<()> {
        let value: serde_json::Value =
            serde_json::from_str(&self.json).context("Paper details must be valid JSON")?;

        let mut session = Session::open(config)?;
        session.mount()?;
        session.set_paper_details(value)?;
        info!("Paper details updated");
        Ok(())
    }
}
