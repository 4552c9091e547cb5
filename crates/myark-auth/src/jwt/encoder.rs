//! JWT token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use myark_core::config::AuthConfig;
use myark_core::error::{AppError, ErrorKind};

use super::claims::{Claims, Role};

/// Signs bearer tokens with the shared secret.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: String,
    ttl_seconds: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl_seconds: i64::try_from(config.token_ttl_seconds).unwrap_or(i64::MAX / 2),
        }
    }

    /// Issue a token for the given user.
    pub fn issue(
        &self,
        uid: &str,
        name: Option<&str>,
        email: Option<&str>,
        role: Role,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: uid.to_string(),
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            role,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to sign token", e))
    }
}
