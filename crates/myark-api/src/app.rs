//! Application builder: wires repositories, services, router, and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use myark_auth::JwtDecoder;
use myark_core::config::AppConfig;
use myark_core::error::AppError;
use myark_database::repositories::{
    GamificationRepository, NotificationPreferenceRepository, ProfileRepository, QuizRepository,
    RewardsRepository, ShareRepository,
};
use myark_service::{
    GamificationEngine, GamificationService, LeaderboardService, NotificationPreferenceService,
    ProfileService, QuizService, RewardsService, ShareService,
};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Construct every repository and service over `db_pool`.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    // ── Repositories ─────────────────────────────────────────────
    let gamification_repo = Arc::new(GamificationRepository::new(db_pool.clone()));
    let quiz_repo = Arc::new(QuizRepository::new(db_pool.clone()));
    let share_repo = Arc::new(ShareRepository::new(db_pool.clone()));
    let rewards_repo = Arc::new(RewardsRepository::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationPreferenceRepository::new(db_pool.clone()));
    let profile_repo = Arc::new(ProfileRepository::new(db_pool.clone()));

    // ── Auth ─────────────────────────────────────────────────────
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let engine = Arc::new(GamificationEngine::new(&config.gamification));
    let leaderboard_service = Arc::new(LeaderboardService::new(
        Arc::clone(&gamification_repo),
        config.gamification.leaderboard.clone(),
    ));
    let gamification_service = Arc::new(GamificationService::new(
        Arc::clone(&gamification_repo),
        engine,
        Arc::clone(&leaderboard_service),
    ));
    let quiz_service = Arc::new(QuizService::new(
        quiz_repo,
        config.gamification.quiz.clone(),
    ));
    let rewards_service = Arc::new(RewardsService::new(rewards_repo));
    let share_service = Arc::new(ShareService::new(share_repo, Arc::clone(&rewards_service)));
    let notification_service = Arc::new(NotificationPreferenceService::new(notification_repo));
    let profile_service = Arc::new(ProfileService::new(
        profile_repo,
        Arc::clone(&gamification_service),
    ));

    AppState {
        config: Arc::new(config),
        db_pool,
        jwt_decoder,
        gamification_service,
        leaderboard_service,
        quiz_service,
        share_service,
        rewards_service,
        notification_service,
        profile_service,
    }
}

/// The router with the middleware stack applied.
pub fn build_app(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = build_cors_layer(&server.cors);
    let body_limit = server.body_limit_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds);

    build_router(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Run the HTTP server until Ctrl+C.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting Myark server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, db_pool);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Myark server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Myark server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
