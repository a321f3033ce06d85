//! Reference data command handlers

use anyhow::Result;
use bpm_client::BpmClient;
use bpm_core::domain::resource::ReferenceData;
use clap::Subcommand;
use colored::*;

/// Reference data subcommands
#[derive(Subcommand)]
pub enum ReferenceCommands {
    /// List BPM users
    Users,
    /// List lead sources
    LeadSources,
    /// List lead status options
    LeadStatus,
}

/// Handle reference data commands
pub async fn handle_reference_command(
    command: ReferenceCommands,
    client: &BpmClient,
) -> Result<()> {
    let data = match command {
        ReferenceCommands::Users => ReferenceData::Users,
        ReferenceCommands::LeadSources => ReferenceData::LeadSources,
        ReferenceCommands::LeadStatus => ReferenceData::LeadStatusOptions,
    };

    let rows = client.list_reference(data).await?;

    if rows.is_empty() {
        println!("{}", format!("No {} found.", data.path()).yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} {} row(s):", rows.len(), data.path()).bold());
    for row in &rows {
        println!("  {} {}", "▸".cyan(), serde_json::to_string(row)?);
    }

    Ok(())
}
