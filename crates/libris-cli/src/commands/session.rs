//! Login, refresh, logout and introspection commands.

use clap::Args;

use crate::context::CliContext;
use crate::output::{self, Field, OutputFormat};
use libris_core::error::AppError;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// A single token argument
#[derive(Debug, Args)]
pub struct TokenArg {
    /// The token (will prompt if not provided)
    pub token: Option<String>,
}

/// Execute the login command
pub async fn login(
    args: &LoginArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let password = super::secret_or_prompt(&args.password, "Password")?;
    let ctx = CliContext::build(config_path, env).await?;

    let result = ctx.orchestrator.authenticate(&args.email, &password).await?;

    let mut fields = vec![
        Field::new("access_token", &result.access_token),
        Field::new("refresh_token", &result.refresh_token),
    ];
    if let Some(first_login) = result.first_login {
        fields.push(Field::new("first_login", first_login));
    }
    output::print_item(&result, &fields, format);
    Ok(())
}

/// Execute the refresh command
pub async fn refresh(
    args: &TokenArg,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let token = super::secret_or_prompt(&args.token, "Refresh token")?;
    let ctx = CliContext::build(config_path, env).await?;

    let pair = ctx.orchestrator.refresh(&token).await?;
    let fields = [
        Field::new("access_token", &pair.access_token),
        Field::new("refresh_token", &pair.refresh_token),
    ];
    output::print_item(&pair, &fields, format);
    Ok(())
}

/// Execute the logout command. Always reports success.
pub async fn logout(args: &TokenArg, config_path: &str, env: &str) -> Result<(), AppError> {
    let token = super::secret_or_prompt(&args.token, "Refresh token")?;
    let ctx = CliContext::build(config_path, env).await?;

    ctx.orchestrator.logout(&token).await;
    output::print_success("Logged out");
    Ok(())
}

/// Execute the introspect command
pub async fn introspect(
    args: &TokenArg,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let token = super::secret_or_prompt(&args.token, "Access token")?;
    let ctx = CliContext::build(config_path, env).await?;

    let report = ctx.orchestrator.introspect(&token).await?;
    output::print_item(&report, &[Field::new("valid", report.valid)], format);
    Ok(())
}
