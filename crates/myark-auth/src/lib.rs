//! # myark-auth
//!
//! Bearer token handling for the Myark platform.
//!
//! Tokens are HS256 JWTs signed with a shared secret. The API only
//! verifies them; the CLI issues them for operators and tests.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, Role};
