//! Admin quiz management handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use myark_core::types::pagination::PageResponse;
use myark_entity::quiz::{QuizAttempt, QuizRegistration};
use myark_service::quiz::QuizView;

use crate::dto::request::QuizRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Params, PaginationParams, PathParam, ValidatedJson};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/admin/quizzes
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<QuizRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<QuizView>>)> {
    require_admin(&auth)?;
    let quiz = state.quiz_service.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(quiz))))
}

/// PUT /api/admin/quizzes/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(req): ValidatedJson<QuizRequest>,
) -> ApiResult<Json<ApiResponse<QuizView>>> {
    require_admin(&auth)?;
    let quiz = state.quiz_service.update(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(quiz)))
}

/// DELETE /api/admin/quizzes/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<StatusCode> {
    require_admin(&auth)?;
    state.quiz_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/quizzes/{id}/registrations
pub async fn registrations(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
    Params(params): Params<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<QuizRegistration>>>> {
    require_admin(&auth)?;
    let page = state
        .quiz_service
        .list_registrations(id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/admin/quizzes/{id}/attempts
pub async fn attempts(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
    Params(params): Params<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<QuizAttempt>>>> {
    require_admin(&auth)?;
    let page = state
        .quiz_service
        .list_attempts(id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}
