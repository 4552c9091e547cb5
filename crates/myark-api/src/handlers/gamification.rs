//! Gamification handlers for the signed-in student.

use axum::Json;
use axum::extract::State;

use myark_entity::gamification::{BadgeDefinition, UserGamification};
use myark_service::gamification::{AwardResult, BadgeOverview, GamificationSummary};

use crate::dto::request::RecordActionRequest;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/gamification/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserGamification>> {
    Ok(Json(state.gamification_service.get_or_create(&auth.user_id).await?))
}

/// GET /api/gamification/me/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<GamificationSummary>> {
    Ok(Json(state.gamification_service.summary(&auth.user_id).await?))
}

/// GET /api/gamification/me/badges
pub async fn my_badges(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<BadgeOverview>> {
    Ok(Json(state.gamification_service.badges(&auth.user_id).await?))
}

/// POST /api/gamification/actions
pub async fn record_action(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RecordActionRequest>,
) -> ApiResult<Json<AwardResult>> {
    let result = state
        .gamification_service
        .record_action(&auth.user_id, req.action, req.subject.as_deref())
        .await?;
    Ok(Json(result))
}

/// GET /api/gamification/badges
pub async fn catalogue(State(state): State<AppState>) -> Json<Vec<BadgeDefinition>> {
    Json(state.gamification_service.catalogue())
}
