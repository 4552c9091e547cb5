//! Leaderboard inspection commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use myark_core::config::AppConfig;
use myark_core::error::AppError;
use myark_database::repositories::GamificationRepository;
use myark_entity::leaderboard::LeaderboardEntry;
use myark_service::LeaderboardService;

use crate::output::{self, OutputFormat};

/// Arguments for leaderboard commands
#[derive(Debug, Args)]
pub struct LeaderboardArgs {
    #[command(subcommand)]
    pub command: LeaderboardCommand,
}

/// Leaderboard subcommands
#[derive(Debug, Subcommand)]
pub enum LeaderboardCommand {
    /// Print the global board, or one school's board
    Show {
        /// Restrict to one school
        #[arg(long)]
        school: Option<String>,
        /// Number of entries
        #[arg(short, long)]
        limit: Option<u32>,
        /// Output format; overrides the global flag
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

/// Leaderboard display row for table output
#[derive(Debug, Serialize, Tabled)]
struct LeaderboardRow {
    rank: u32,
    uid: String,
    name: String,
    school: String,
    xp: i64,
    level: i32,
    badges: u32,
}

impl From<LeaderboardEntry> for LeaderboardRow {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            uid: entry.uid,
            name: entry.display_name,
            school: entry.school_name.unwrap_or_default(),
            xp: entry.total_xp,
            level: entry.level,
            badges: entry.badge_count,
        }
    }
}

/// Execute leaderboard commands
pub async fn execute(
    args: &LeaderboardArgs,
    config: &AppConfig,
    default_format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        LeaderboardCommand::Show {
            school,
            limit,
            format,
        } => {
            let pool = super::create_db_pool(config).await?;
            let service = LeaderboardService::new(
                Arc::new(GamificationRepository::new(pool)),
                config.gamification.leaderboard.clone(),
            );

            let entries = match school {
                Some(school_id) => service.school(school_id, *limit).await?.entries,
                None => service.global(*limit).await?,
            };
            let rows: Vec<LeaderboardRow> =
                entries.into_iter().map(LeaderboardRow::from).collect();
            output::print_list(&rows, format.unwrap_or(default_format));
        }
    }
    Ok(())
}
