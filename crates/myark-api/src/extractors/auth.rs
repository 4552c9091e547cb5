//! `AuthUser` extractor: validates the bearer token and injects the caller's context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use myark_core::error::AppError;
use myark_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Like [`AuthUser`], but anonymous requests are let through. A token that
/// is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<RequestContext>);

impl OptionalAuthUser {
    pub fn context(&self) -> Option<&RequestContext> {
        self.0.as_ref()
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| AppError::authentication("Invalid Authorization header"))?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;
    Ok(Some(token))
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<Option<RequestContext>, AppError> {
    match bearer_token(parts)? {
        Some(token) => {
            let claims = state.jwt_decoder.decode(token)?;
            Ok(Some(RequestContext::from_claims(claims)))
        }
        None => Ok(None),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = authenticate(parts, state)?
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;
        Ok(AuthUser(ctx))
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(authenticate(parts, state)?))
    }
}
