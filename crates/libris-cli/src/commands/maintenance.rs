//! Maintenance mode commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use libris_core::config::AppConfig;
use libris_core::error::AppError;
use libris_core::traits::MaintenanceFlag;

use crate::output::{self, Field, OutputFormat};

/// Arguments for maintenance commands
#[derive(Debug, Args)]
pub struct MaintenanceArgs {
    /// Maintenance subcommand
    #[command(subcommand)]
    pub command: MaintenanceCommand,
}

/// Maintenance subcommands
#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// Block logins for accounts holding only the plain user role
    On {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Allow all logins again
    Off,
    /// Show whether maintenance mode is on
    Status,
}

#[derive(Debug, Serialize)]
struct MaintenanceStatus {
    enabled: bool,
}

/// Execute maintenance commands
pub async fn execute(
    args: &MaintenanceArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = AppConfig::load(config_path, env)?;
    let settings = crate::context::connect(&config).await?.settings();

    match &args.command {
        MaintenanceCommand::On { force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Block every login holding only the {} role?",
                        config.auth.user_role_name
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            settings.set_maintenance(true).await?;
            output::print_success("Maintenance mode enabled");
        }
        MaintenanceCommand::Off => {
            settings.set_maintenance(false).await?;
            output::print_success("Maintenance mode disabled");
        }
        MaintenanceCommand::Status => {
            let enabled = settings.is_enabled().await?;
            output::print_item(
                &MaintenanceStatus { enabled },
                &[Field::new("maintenance", if enabled { "on" } else { "off" })],
                format,
            );
        }
    }

    Ok(())
}
