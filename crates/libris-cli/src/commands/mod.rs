//! CLI command definitions and dispatch.

pub mod activation;
pub mod maintenance;
pub mod migrate;
pub mod password;
pub mod revocation;
pub mod session;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use libris_core::error::AppError;

/// Libris: authentication operator tool
#[derive(Debug, Parser)]
#[command(name = "libris", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(short, long, env = "LIBRIS_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authenticate and print an access/refresh token pair
    Login(session::LoginArgs),
    /// Exchange a refresh token for a new token pair
    Refresh(session::TokenArg),
    /// Revoke a refresh token
    Logout(session::TokenArg),
    /// Report whether an access token is valid
    Introspect(session::TokenArg),
    /// Consume an activation token and activate its account
    Activate(session::TokenArg),
    /// Mint an activation token for an account
    ActivationToken(activation::ActivationTokenArgs),
    /// Hash a password for storage
    HashPassword(password::HashPasswordArgs),
    /// Maintenance mode switch
    Maintenance(maintenance::MaintenanceArgs),
    /// Revocation registry management
    Revocations(revocation::RevocationArgs),
    /// Apply pending database migrations
    Migrate,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let (config, env, format) = (self.config.as_str(), self.env.as_str(), self.format);
        match &self.command {
            Commands::Login(args) => session::login(args, config, env, format).await,
            Commands::Refresh(args) => session::refresh(args, config, env, format).await,
            Commands::Logout(args) => session::logout(args, config, env).await,
            Commands::Introspect(args) => session::introspect(args, config, env, format).await,
            Commands::Activate(args) => activation::activate(args, config, env).await,
            Commands::ActivationToken(args) => {
                activation::issue(args, config, env, format).await
            }
            Commands::HashPassword(args) => password::execute(args, format),
            Commands::Maintenance(args) => maintenance::execute(args, config, env, format).await,
            Commands::Revocations(args) => revocation::execute(args, config, env, format).await,
            Commands::Migrate => migrate::execute(config, env).await,
        }
    }
}

/// Read a value from the argument or prompt for it without echo.
pub fn secret_or_prompt(value: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}
