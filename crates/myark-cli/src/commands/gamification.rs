//! XP administration commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use myark_core::config::AppConfig;
use myark_core::error::AppError;
use myark_database::repositories::GamificationRepository;
use myark_service::{GamificationEngine, GamificationService, LeaderboardService};

use crate::output;

/// Arguments for gamification commands
#[derive(Debug, Args)]
pub struct GamificationArgs {
    #[command(subcommand)]
    pub command: GamificationCommand,
}

/// Gamification subcommands
#[derive(Debug, Subcommand)]
pub enum GamificationCommand {
    /// Award XP to a student
    Award {
        /// Student user id
        uid: String,
        /// XP to add
        amount: i64,
        /// Reason recorded with the award
        #[arg(long, default_value = "admin_award")]
        action: String,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Execute gamification commands
pub async fn execute(args: &GamificationArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        GamificationCommand::Award {
            uid,
            amount,
            action,
            yes,
        } => {
            if *amount < 0 {
                return Err(AppError::validation("XP amount must not be negative"));
            }
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Award {amount} XP to '{uid}'?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let service = build_service(config).await?;
            let result = service.award_xp(uid, *amount, action).await?;

            output::print_success(&format!("Awarded {} XP to '{}'", result.xp_awarded, uid));
            output::print_kv("Total XP", &result.record.total_xp.to_string());
            output::print_kv("Level", &result.record.level.to_string());
            if result.leveled_up {
                output::print_kv("Leveled up", "yes");
            }
            for badge in &result.new_badges {
                output::print_kv("New badge", badge.id.as_str());
            }
        }
    }
    Ok(())
}

async fn build_service(config: &AppConfig) -> Result<GamificationService, AppError> {
    let pool = super::create_db_pool(config).await?;
    let repo = Arc::new(GamificationRepository::new(pool));
    let leaderboard = Arc::new(LeaderboardService::new(
        Arc::clone(&repo),
        config.gamification.leaderboard.clone(),
    ));
    Ok(GamificationService::new(
        repo,
        Arc::new(GamificationEngine::new(&config.gamification)),
        leaderboard,
    ))
}
