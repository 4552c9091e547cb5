//! Global, school, and top-performer leaderboards.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use tracing::warn;

use myark_entity::leaderboard::{SchoolLeaderboard, UserRanks};

use crate::dto::request::{LimitQuery, TopPerformersQuery};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Params, PathParam};
use crate::state::AppState;

/// GET /api/leaderboard/global
pub async fn global(
    State(state): State<AppState>,
    Params(query): Params<LimitQuery>,
) -> ApiResult<Json<Value>> {
    let entries = state.leaderboard_service.global(query.limit).await?;
    Ok(Json(json!({ "success": true, "leaderboard": entries })))
}

/// GET /api/leaderboard/school/{school_id}
pub async fn school(
    State(state): State<AppState>,
    PathParam(school_id): PathParam<String>,
    Params(query): Params<LimitQuery>,
) -> ApiResult<Json<SchoolLeaderboard>> {
    Ok(Json(state.leaderboard_service.school(&school_id, query.limit).await?))
}

/// GET /api/leaderboard/me/rank
///
/// Also awards any rank badges the fresh ranks qualify for.
pub async fn my_rank(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserRanks>> {
    let ranks = state.leaderboard_service.user_ranks(&auth.user_id).await?;
    if ranks.global_rank.is_some() {
        if let Err(e) = state
            .gamification_service
            .evaluate_rank_badges(&auth.user_id)
            .await
        {
            warn!(user_id = %auth.user_id, error = %e, "Rank badge evaluation failed");
        }
    }
    Ok(Json(ranks))
}

/// GET /api/leaderboard/top
pub async fn top(
    State(state): State<AppState>,
    Params(query): Params<TopPerformersQuery>,
) -> ApiResult<Json<Value>> {
    let metric = query.metric.unwrap_or_default();
    let entries = state
        .leaderboard_service
        .top_performers(metric, query.limit)
        .await?;
    Ok(Json(json!({ "success": true, "metric": metric, "leaderboard": entries })))
}
