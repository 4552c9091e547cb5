//! Client network details from proxy headers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use myark_service::context::ClientInfo;

/// The caller's address, user agent, and referrer.
#[derive(Debug, Clone)]
pub struct Client(pub ClientInfo);

impl<S: Send + Sync> FromRequestParts<S> for Client {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| parts.headers.get(name).and_then(|v| v.to_str().ok());
        Ok(Client(ClientInfo::from_headers(
            header("x-forwarded-for"),
            header("x-real-ip"),
            header("user-agent"),
            header("referer"),
        )))
    }
}
