//! CLI command definitions and dispatch.

pub mod config;
pub mod gamification;
pub mod leaderboard;
pub mod migrate;
pub mod token;

use clap::{Parser, Subcommand};

use myark_core::config::AppConfig;
use myark_core::error::AppError;
use myark_database::DatabasePool;

use crate::output::OutputFormat;

/// Myark operations CLI
#[derive(Debug, Parser)]
#[command(name = "myark", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (config/{env}.toml)
    #[arg(short, long, env = "MYARK_ENV", default_value = "development")]
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
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Issue bearer tokens for operators and testing
    Token(token::TokenArgs),
    /// Leaderboard inspection
    Leaderboard(leaderboard::LeaderboardArgs),
    /// XP administration
    Gamification(gamification::GamificationArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let app_config = AppConfig::load(&self.env)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &app_config).await,
            Commands::Config(args) => config::execute(args, &app_config),
            Commands::Token(args) => token::execute(args, &app_config),
            Commands::Leaderboard(args) => {
                leaderboard::execute(args, &app_config, self.format).await
            }
            Commands::Gamification(args) => gamification::execute(args, &app_config).await,
        }
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
