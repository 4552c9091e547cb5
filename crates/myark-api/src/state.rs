//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use myark_auth::JwtDecoder;
use myark_core::config::AppConfig;
use myark_service::{
    GamificationService, LeaderboardService, NotificationPreferenceService, ProfileService,
    QuizService, RewardsService, ShareService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verifier
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub gamification_service: Arc<GamificationService>,
    pub leaderboard_service: Arc<LeaderboardService>,
    pub quiz_service: Arc<QuizService>,
    pub share_service: Arc<ShareService>,
    pub rewards_service: Arc<RewardsService>,
    pub notification_service: Arc<NotificationPreferenceService>,
    pub profile_service: Arc<ProfileService>,
}
