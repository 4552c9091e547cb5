//! Share-rewards program endpoints.

use axum::Json;
use axum::extract::State;

use myark_entity::rewards::{RewardConfig, UserRewards};

use crate::error::ApiResult;
use crate::extractors::{AuthUser, Body};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/rewards/config
pub async fn config(State(state): State<AppState>) -> ApiResult<Json<RewardConfig>> {
    Ok(Json(state.rewards_service.config().await?))
}

/// PUT /api/rewards/config (admin)
pub async fn update_config(
    State(state): State<AppState>,
    auth: AuthUser,
    Body(config): Body<RewardConfig>,
) -> ApiResult<Json<RewardConfig>> {
    require_admin(&auth)?;
    Ok(Json(state.rewards_service.update_config(config).await?))
}

/// GET /api/rewards/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserRewards>> {
    Ok(Json(state.rewards_service.my_rewards(&auth.user_id).await?))
}
