//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod install;
mod reference;
mod resource;

pub use install::InstallCommands;
pub use reference::ReferenceCommands;
pub use resource::ResourceCommands;

use anyhow::Result;
use bpm_core::domain::resource::ResourceKind;
use clap::Subcommand;
use tracing::debug;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Install management
    Installs {
        #[command(subcommand)]
        command: InstallCommands,
    },
    /// Lead management (requires a bearer token)
    Leads {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Customer management
    Customers {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Reference data
    Reference {
        #[command(subcommand)]
        command: ReferenceCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    debug!(api_url = %config.api_url, page_size = config.page_size, "Using BPM API");
    let client = config.client()?;

    match command {
        Commands::Installs { command } => {
            install::handle_install_command(command, &client, config).await
        }
        Commands::Leads { command } => {
            resource::handle_resource_command(ResourceKind::Lead, command, &client, config).await
        }
        Commands::Customers { command } => {
            resource::handle_resource_command(ResourceKind::Customer, command, &client, config)
                .await
        }
        Commands::Reference { command } => {
            reference::handle_reference_command(command, &client).await
        }
    }
}
