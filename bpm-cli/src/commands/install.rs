//! Install command handlers
//!
//! Installs support the shared resource commands plus a progress timeline.

use anyhow::Result;
use bpm_client::BpmClient;
use bpm_core::domain::install::{StageState, TimelineItem, install_timeline};
use bpm_core::domain::resource::ResourceKind;
use clap::Subcommand;
use colored::*;
use serde_json::Value;

use super::resource::{ResourceCommands, handle_resource_command, record_title};
use crate::config::Config;

/// Install subcommands
#[derive(Subcommand)]
pub enum InstallCommands {
    #[command(flatten)]
    Resource(ResourceCommands),
    /// Show how far an install has progressed
    Timeline {
        /// Install ID
        id: String,
    },
}

/// Handle install commands
pub async fn handle_install_command(
    command: InstallCommands,
    client: &BpmClient,
    config: &Config,
) -> Result<()> {
    match command {
        InstallCommands::Resource(command) => {
            handle_resource_command(ResourceKind::Install, command, client, config).await
        }
        InstallCommands::Timeline { id } => show_timeline(client, &id).await,
    }
}

/// Print the progress timeline of one install
async fn show_timeline(client: &BpmClient, id: &str) -> Result<()> {
    let Some(install) = client.get_by_id(ResourceKind::Install, id).await? else {
        println!("{}", format!("No install found with ID {}.", id).yellow());
        return Ok(());
    };

    let status = install.get("status").and_then(Value::as_str);
    println!(
        "{} {}",
        "Progress for".bold(),
        record_title(&install).bold()
    );
    println!("  Status: {}", status.unwrap_or("-").cyan());
    println!();

    for item in install_timeline(status) {
        print_timeline_item(&item);
    }

    Ok(())
}

fn print_timeline_item(item: &TimelineItem) {
    match item.state {
        StageState::Complete => println!("  {} {}", "✓".green(), item.title),
        StageState::Active => println!("  {} {}", "●".cyan(), item.title.bold()),
        StageState::Inactive => println!("  {} {}", "○".dimmed(), item.title.dimmed()),
    }
}
