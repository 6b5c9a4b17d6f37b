//! Password hashing command.

use clap::Args;
use serde::Serialize;

use libris_auth::PasswordHasher;
use libris_core::error::AppError;

use crate::output::{self, Field, OutputFormat};

/// Arguments for the hash-password command
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Password (will prompt with confirmation if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct HashOutput {
    hash: String,
}

/// Execute the hash-password command
pub fn execute(args: &HashPasswordArgs, format: OutputFormat) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let hash = PasswordHasher::new().hash_password(&password)?;
    let fields = [Field::new("hash", &hash)];
    output::print_item(&HashOutput { hash }, &fields, format);
    Ok(())
}
