//! Admin XP adjustments.

use axum::Json;
use axum::extract::State;

use myark_service::gamification::AwardResult;

use crate::dto::request::AwardXpRequest;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PathParam, ValidatedJson};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/admin/gamification/{uid}/award
pub async fn award(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(uid): PathParam<String>,
    ValidatedJson(req): ValidatedJson<AwardXpRequest>,
) -> ApiResult<Json<AwardResult>> {
    require_admin(&auth)?;
    let result = state
        .gamification_service
        .award_xp(&uid, req.amount, &req.action)
        .await?;
    tracing::info!(admin = %auth.user_id, uid = %uid, amount = req.amount, "XP awarded by admin");
    Ok(Json(result))
}
