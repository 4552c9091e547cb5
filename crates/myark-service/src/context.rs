//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use myark_auth::{Claims, Role};

/// Context for the current authenticated request.
///
/// Extracted by the API layer from a verified bearer token and passed into
/// service methods so every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's user id.
    pub user_id: String,
    /// Display name from the token, if any.
    pub name: Option<String>,
    /// Email from the token, if any.
    pub email: Option<String>,
    pub role: Role,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: impl Into<String>,
        name: Option<String>,
        email: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name,
            email,
            role,
            request_time: Utc::now(),
        }
    }

    /// Builds a context from verified token claims.
    pub fn from_claims(claims: Claims) -> Self {
        Self::new(claims.sub, claims.name, claims.email, claims.role)
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name to show for the caller: token name, then email, then "Student".
    pub fn display_name(&self) -> String {
        [self.name.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or("Student")
            .to_string()
    }
}

/// Network details of the client making a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Best-effort client address; "unknown" when no proxy header is present.
    pub ip_address: String,
    /// User-Agent header value, or "unknown".
    pub user_agent: String,
    pub referrer: Option<String>,
}

impl ClientInfo {
    /// Resolve client details from proxy headers.
    ///
    /// The first `x-forwarded-for` entry wins, then `x-real-ip`.
    pub fn from_headers(
        forwarded_for: Option<&str>,
        real_ip: Option<&str>,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        let ip_address = forwarded_for
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| real_ip.map(str::trim).filter(|v| !v.is_empty()))
            .unwrap_or("unknown")
            .to_string();
        let user_agent = user_agent
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("unknown")
            .to_string();
        Self {
            ip_address,
            user_agent,
            referrer: referrer.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let ctx = RequestContext::new("u1", Some("Asha".into()), None, Role::Student);
        assert_eq!(ctx.display_name(), "Asha");

        let ctx = RequestContext::new("u1", Some(" ".into()), Some("a@b.c".into()), Role::Student);
        assert_eq!(ctx.display_name(), "a@b.c");

        let ctx = RequestContext::new("u1", None, None, Role::Student);
        assert_eq!(ctx.display_name(), "Student");
    }

    #[test]
    fn test_client_ip_resolution() {
        let info = ClientInfo::from_headers(Some("203.0.113.5, 10.0.0.1"), Some("10.0.0.2"), None, None);
        assert_eq!(info.ip_address, "203.0.113.5");
        assert_eq!(info.user_agent, "unknown");

        let info = ClientInfo::from_headers(None, Some("10.0.0.2"), Some("curl/8"), None);
        assert_eq!(info.ip_address, "10.0.0.2");
        assert_eq!(info.user_agent, "curl/8");

        let info = ClientInfo::from_headers(None, None, None, None);
        assert_eq!(info.ip_address, "unknown");
    }
}
