//! Route definitions for the Myark HTTP API.
//!
//! Routes are grouped by domain and mounted under `/api`; health checks sit
//! at the root so load balancers can reach them without the prefix.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(gamification_routes())
        .merge(leaderboard_routes())
        .merge(quiz_routes())
        .merge(share_routes())
        .merge(rewards_routes())
        .merge(notification_routes())
        .merge(profile_routes())
        .merge(admin_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes())
        .with_state(state)
}

/// Health endpoints: liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::ready))
}

/// XP, levels, streaks, and badges for the caller
fn gamification_routes() -> Router<AppState> {
    Router::new()
        .route("/gamification/me", get(handlers::gamification::me))
        .route("/gamification/me/summary", get(handlers::gamification::summary))
        .route("/gamification/me/badges", get(handlers::gamification::my_badges))
        .route("/gamification/actions", post(handlers::gamification::record_action))
        .route("/gamification/badges", get(handlers::gamification::catalogue))
}

fn leaderboard_routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard/global", get(handlers::leaderboard::global))
        .route("/leaderboard/school/{school_id}", get(handlers::leaderboard::school))
        .route("/leaderboard/me/rank", get(handlers::leaderboard::my_rank))
        .route("/leaderboard/top", get(handlers::leaderboard::top))
}

/// Quiz viewing, registration, submission, and leaderboard
fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/quizzes/{id}", get(handlers::quiz::get))
        .route(
            "/quizzes/{id}/register",
            post(handlers::quiz::register).get(handlers::quiz::registration_status),
        )
        .route("/quizzes/{id}/submit", post(handlers::quiz::submit))
        .route("/quizzes/{id}/leaderboard", get(handlers::quiz::leaderboard))
}

fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/shares/record", post(handlers::share::record))
        .route("/shares/click", post(handlers::share::click))
        .route("/shares/convert", post(handlers::share::convert))
        .route("/shares/analytics", get(handlers::share::analytics))
}

fn rewards_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/rewards/config",
            get(handlers::rewards::config).put(handlers::rewards::update_config),
        )
        .route("/rewards/me", get(handlers::rewards::me))
}

fn notification_routes() -> Router<AppState> {
    Router::new().route(
        "/notifications/preferences",
        get(handlers::notification::get).put(handlers::notification::update),
    )
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/student/profile",
            get(handlers::profile::get).put(handlers::profile::update),
        )
        .route("/student/profile/public/{slug}", get(handlers::profile::public))
}

/// Admin endpoints (role checked in each handler)
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/quizzes", post(handlers::admin::quizzes::create))
        .route(
            "/admin/quizzes/{id}",
            put(handlers::admin::quizzes::update).delete(handlers::admin::quizzes::delete),
        )
        .route(
            "/admin/quizzes/{id}/registrations",
            get(handlers::admin::quizzes::registrations),
        )
        .route(
            "/admin/quizzes/{id}/attempts",
            get(handlers::admin::quizzes::attempts),
        )
        .route(
            "/admin/gamification/{uid}/award",
            post(handlers::admin::gamification::award),
        )
}
