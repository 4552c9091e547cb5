//! Role guards for admin routes.

use myark_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_admin() {
        return Err(AppError::authorization("Admin access required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use myark_auth::Role;
    use myark_service::context::RequestContext;

    #[test]
    fn test_require_admin() {
        let student = AuthUser(RequestContext::new("u1", None, None, Role::Student));
        let err = require_admin(&student).unwrap_err();
        assert_eq!(err.kind, myark_core::error::ErrorKind::Authorization);

        let admin = AuthUser(RequestContext::new("a1", None, None, Role::Admin));
        assert!(require_admin(&admin).is_ok());
    }
}
