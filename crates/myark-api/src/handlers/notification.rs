//! Notification preference endpoints.

use axum::Json;
use axum::extract::State;

use myark_entity::notification::{NotificationPreferences, NotificationPreferencesUpdate};

use crate::error::ApiResult;
use crate::extractors::{AuthUser, Body};
use crate::state::AppState;

/// GET /api/notifications/preferences
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NotificationPreferences>> {
    Ok(Json(state.notification_service.get(&auth.user_id).await?))
}

/// PUT /api/notifications/preferences
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Body(update): Body<NotificationPreferencesUpdate>,
) -> ApiResult<Json<NotificationPreferences>> {
    Ok(Json(state.notification_service.update(&auth.user_id, &update).await?))
}
