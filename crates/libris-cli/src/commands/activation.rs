//! Account activation commands.

use clap::Args;
use serde::Serialize;

use crate::context::CliContext;
use crate::output::{self, Field, OutputFormat};
use libris_core::error::AppError;

use super::session::TokenArg;

/// Arguments for the activation-token command
#[derive(Debug, Args)]
pub struct ActivationTokenArgs {
    /// Email of the account to activate
    #[arg(short, long)]
    pub email: String,
}

#[derive(Debug, Serialize)]
struct ActivationTokenOutput<'a> {
    account_id: &'a str,
    token: &'a str,
    issued_at: String,
    expires_at: String,
}

/// Execute the activate command
pub async fn activate(args: &TokenArg, config_path: &str, env: &str) -> Result<(), AppError> {
    let token = super::secret_or_prompt(&args.token, "Activation token")?;
    let ctx = CliContext::build(config_path, env).await?;

    ctx.orchestrator.activate(&token).await?;
    output::print_success("Account activated");
    Ok(())
}

/// Execute the activation-token command
pub async fn issue(
    args: &ActivationTokenArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = CliContext::build(config_path, env).await?;
    let issued = ctx.orchestrator.issue_activation_token(&args.email).await?;

    let out = ActivationTokenOutput {
        account_id: &issued.claims.iss,
        token: &issued.token,
        issued_at: issued.claims.issued_at().to_rfc3339(),
        expires_at: issued.claims.expires_at().to_rfc3339(),
    };
    let fields = [
        Field::new("account_id", out.account_id),
        Field::new("token", out.token),
        Field::new("issued_at", &out.issued_at),
        Field::new("expires_at", &out.expires_at),
    ];
    output::print_item(&out, &fields, format);
    Ok(())
}
