//! Student profile endpoints.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use myark_service::profile::{ProfileUpdate, ProfileView};

use crate::error::ApiResult;
use crate::extractors::{AuthUser, Body, PathParam};
use crate::state::AppState;

/// GET /api/student/profile
pub async fn get(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<ProfileView>> {
    Ok(Json(state.profile_service.get(auth.context()).await?))
}

/// PUT /api/student/profile
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Body(update): Body<ProfileUpdate>,
) -> ApiResult<Json<ProfileView>> {
    Ok(Json(state.profile_service.update(auth.context(), update).await?))
}

/// GET /api/student/profile/public/{slug}
pub async fn public(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> ApiResult<Json<Value>> {
    let profile = state.profile_service.public_by_slug(&slug).await?;
    Ok(Json(json!({ "item": profile })))
}
