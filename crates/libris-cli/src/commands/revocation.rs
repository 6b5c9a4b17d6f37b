//! Revocation registry commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use libris_core::config::RevocationBackend;
use libris_core::error::AppError;
use libris_core::traits::Clock;

use crate::context::CliContext;
use crate::output::{self, Field, OutputFormat};

/// Arguments for revocation commands
#[derive(Debug, Args)]
pub struct RevocationArgs {
    /// Revocation subcommand
    #[command(subcommand)]
    pub command: RevocationCommand,
}

/// Revocation subcommands
#[derive(Debug, Subcommand)]
pub enum RevocationCommand {
    /// Delete records past their retention deadline
    Sweep,
    /// Show how many records are held
    Status,
}

#[derive(Debug, Serialize)]
struct SweepOutput {
    purged: u64,
}

#[derive(Debug, Serialize)]
struct StatusOutput {
    backend: RevocationBackend,
    healthy: bool,
    records: Option<i64>,
}

/// Execute revocation commands
pub async fn execute(
    args: &RevocationArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = CliContext::build(config_path, env).await?;

    match &args.command {
        RevocationCommand::Sweep => {
            let purged = ctx.registry.sweep(ctx.clock.now()).await?;
            output::print_item(
                &SweepOutput { purged },
                &[Field::new("purged", purged)],
                format,
            );
        }
        RevocationCommand::Status => {
            let backend = ctx.config.revocation.backend;
            let healthy = ctx.registry.health_check().await?;
            let records = match backend {
                RevocationBackend::Postgres => {
                    Some(ctx.db.revoked_tokens().count().await?)
                }
                RevocationBackend::Memory => None,
            };

            let fields = [
                Field::new("backend", format!("{backend:?}").to_lowercase()),
                Field::new("healthy", healthy),
                Field::new(
                    "records",
                    records.map_or_else(|| "n/a".to_string(), |n| n.to_string()),
                ),
            ];
            output::print_item(
                &StatusOutput {
                    backend,
                    healthy,
                    records,
                },
                &fields,
                format,
            );
        }
    }

    Ok(())
}
