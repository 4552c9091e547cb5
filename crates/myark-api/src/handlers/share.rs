//! Share tracking endpoints.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use myark_service::share::ShareAnalytics;

use crate::dto::request::{
    AnalyticsQuery, RecordShareRequest, ShareClickRequest, ShareConversionRequest,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Client, OptionalAuthUser, Params, ValidatedJson};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/shares/record
pub async fn record(
    State(state): State<AppState>,
    OptionalAuthUser(sharer): OptionalAuthUser,
    Client(client): Client,
    ValidatedJson(req): ValidatedJson<RecordShareRequest>,
) -> ApiResult<Json<Value>> {
    let record = state
        .share_service
        .record_share(sharer.as_ref(), req.into(), &client)
        .await?;
    Ok(Json(json!({ "success": true, "shareCode": record.share_code })))
}

/// POST /api/shares/click
pub async fn click(
    State(state): State<AppState>,
    Client(client): Client,
    ValidatedJson(req): ValidatedJson<ShareClickRequest>,
) -> ApiResult<Json<Value>> {
    state.share_service.record_click(&req.share_code, &client).await?;
    Ok(Json(json!({ "success": true })))
}

/// POST /api/shares/convert
///
/// The converting user is taken from the body, falling back to the token.
pub async fn convert(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    Client(client): Client,
    ValidatedJson(req): ValidatedJson<ShareConversionRequest>,
) -> ApiResult<Json<Value>> {
    let user_id = req
        .user_id
        .filter(|id| !id.trim().is_empty())
        .or_else(|| caller.map(|ctx| ctx.user_id));
    state
        .share_service
        .record_conversion(&req.share_code, req.conversion_type, user_id.as_deref(), &client)
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/shares/analytics (admin)
pub async fn analytics(
    State(state): State<AppState>,
    auth: AuthUser,
    Params(query): Params<AnalyticsQuery>,
) -> ApiResult<Json<ShareAnalytics>> {
    require_admin(&auth)?;
    Ok(Json(state.share_service.analytics(&query.into()).await?))
}
