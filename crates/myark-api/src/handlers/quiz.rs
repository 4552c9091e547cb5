//! Student-facing quiz endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::{Value, json};
use uuid::Uuid;

use myark_core::error::AppError;
use myark_service::quiz::LeaderboardOutcome;

use crate::dto::request::SubmitQuizRequest;
use crate::dto::response::FlatResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, OptionalAuthUser, PathParam, ValidatedJson};
use crate::state::AppState;

const VIEW_COOKIE_MAX_AGE: u32 = 24 * 60 * 60;

fn view_cookie_name(id: Uuid) -> String {
    format!("quiz_{id}_viewed")
}

/// GET /api/quizzes/{id}
///
/// Views are counted once per browser per day through a marker cookie.
pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<Value>)> {
    let name = view_cookie_name(id);
    let count_view = jar.get(&name).is_none();
    let quiz = state.quiz_service.get(id, count_view).await?;

    let jar = if count_view {
        let cookie = Cookie::parse(format!(
            "{name}=true; Max-Age={VIEW_COOKIE_MAX_AGE}; HttpOnly; SameSite=Lax; Path=/"
        ))
        .map_err(|e| AppError::internal(format!("Failed to build view cookie: {e}")))?;
        jar.add(cookie)
    } else {
        jar
    };

    Ok((
        jar,
        Json(json!({ "success": true, "quiz": quiz, "viewIncremented": count_view })),
    ))
}

/// POST /api/quizzes/{id}/register
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<Value>> {
    let outcome = state.quiz_service.register(id, auth.context()).await?;
    Ok(Json(json!({
        "success": true,
        "alreadyRegistered": outcome.already_registered,
        "isRegistered": true,
        "registeredAt": outcome.registration.registered_at,
    })))
}

/// GET /api/quizzes/{id}/register
pub async fn registration_status(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<Value>> {
    let status = state
        .quiz_service
        .registration_status(id, &auth.user_id)
        .await?;
    Ok(Json(json!({ "success": true, "status": status })))
}

/// POST /api/quizzes/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(req): ValidatedJson<SubmitQuizRequest>,
) -> ApiResult<Json<Value>> {
    let result = state
        .quiz_service
        .submit(id, auth.context(), req.responses, req.time_spent)
        .await?;
    Ok(Json(json!({ "success": true, "result": result })))
}

/// GET /api/quizzes/{id}/leaderboard
///
/// A locked board answers 403 with the time it opens, when known.
pub async fn leaderboard(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Response> {
    let viewer = viewer.as_ref().map(|ctx| ctx.user_id.as_str());
    let response = match state.quiz_service.leaderboard(id, viewer).await? {
        LeaderboardOutcome::Visible(board) => Json(FlatResponse::ok(board)).into_response(),
        LeaderboardOutcome::Locked { reason, visible_at } => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "AUTHORIZATION",
                "message": reason,
                "visibleAt": visible_at,
            })),
        )
            .into_response(),
    };
    Ok(response)
}
