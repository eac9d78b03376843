use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::JwtKeys;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Issue a bearer token for a user (uses JWT_SECRET)")]
    Issue {
        #[arg(long, help = "User id the token authenticates")]
        user: Uuid,
        #[arg(long, help = "Override the configured expiry in hours")]
        expiry_hours: Option<u64>,
    },
}

pub fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Issue { user, expiry_hours } => {
            let security = &crate::config::config().security;
            if security.jwt_secret.is_empty() {
                anyhow::bail!("JWT_SECRET is not defined in environment variables");
            }
            let keys = JwtKeys::new(
                security.jwt_secret.clone(),
                expiry_hours.unwrap_or(security.jwt_expiry_hours),
            );

            let token = keys.issue(user).context("failed to issue token")?;

            match output_format {
                OutputFormat::Json => output_success(
                    output_format,
                    "Token issued",
                    Some(json!({
                        "token": token,
                        "user_id": user,
                        "expires_in_hours": keys.expiry_hours(),
                    })),
                ),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
    }
}
