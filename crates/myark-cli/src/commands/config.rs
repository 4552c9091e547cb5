//! Configuration inspection commands.

use clap::{Args, Subcommand};

use myark_core::config::AppConfig;
use myark_core::error::AppError;
use myark_database::connection::mask_password;

use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration with secrets masked
    Show,
    /// Check that the configuration loads and summarize it
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_json(&masked(config)),
        ConfigCommand::Validate => {
            output::print_success("Configuration is valid");
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Database", &mask_password(&config.database.url));
            output::print_kv("Log level", &config.logging.level);
            output::print_kv("Token issuer", &config.auth.issuer);
        }
    }
    Ok(())
}

/// A copy of `config` that is safe to print.
fn masked(config: &AppConfig) -> AppConfig {
    let mut copy = config.clone();
    copy.auth.jwt_secret = "****".to_string();
    copy.database.url = mask_password(&copy.database.url);
    copy
}
