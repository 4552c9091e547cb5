//! Bearer token issuing.

use clap::{Args, Subcommand};

use myark_auth::{JwtDecoder, JwtEncoder, Role};
use myark_core::config::AppConfig;
use myark_core::error::AppError;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Print a signed token for a user
    Issue {
        /// User id placed in the `sub` claim
        #[arg(long)]
        uid: String,
        /// Display name claim
        #[arg(long)]
        name: Option<String>,
        /// Email claim
        #[arg(long)]
        email: Option<String>,
        /// Issue an admin token
        #[arg(long)]
        admin: bool,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue {
            uid,
            name,
            email,
            admin,
        } => {
            let role = if *admin { Role::Admin } else { Role::Student };
            let token = JwtEncoder::new(&config.auth).issue(
                uid,
                name.as_deref(),
                email.as_deref(),
                role,
            )?;
            println!("{token}");
            let claims = JwtDecoder::new(&config.auth).decode(&token)?;
            if let Some(at) = claims.expires_at() {
                eprintln!("Expires at {}", at.to_rfc3339());
            }
        }
    }
    Ok(())
}
