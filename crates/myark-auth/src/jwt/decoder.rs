//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use myark_core::config::AuthConfig;
use myark_core::error::AppError;

use super::claims::Claims;

/// Verifies bearer tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate a token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::authentication("Invalid token issuer")
                }
                _ => AppError::authentication("Invalid token"),
            }
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AppError::authentication("Token has no subject"));
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::jwt::{JwtEncoder, Role};
    use myark_core::error::ErrorKind;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let cfg = config("test-secret");
        let token = JwtEncoder::new(&cfg)
            .issue("uid-123", Some("Asha"), Some("asha@example.com"), Role::Admin)
            .unwrap();
        let claims = JwtDecoder::new(&cfg).decode(&token).unwrap();
        assert_eq!(claims.user_id(), "uid-123");
        assert_eq!(claims.name.as_deref(), Some("Asha"));
        assert!(claims.is_admin());
        assert_eq!(claims.iss, "myark");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtEncoder::new(&config("a"))
            .issue("uid-1", None, None, Role::Student)
            .unwrap();
        let err = JwtDecoder::new(&config("b")).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config("test-secret");
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "uid-1".into(),
            name: None,
            email: None,
            role: Role::Student,
            iss: cfg.issuer.clone(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = JwtEncoder::new(&cfg).sign(&claims).unwrap();
        let err = JwtDecoder::new(&cfg).decode(&token).unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config("s")).decode("not.a.jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
