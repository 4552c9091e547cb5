//! Custom Axum extractors.

pub mod auth;
pub mod client;
pub mod json;
pub mod pagination;
pub mod params;

pub use auth::{AuthUser, OptionalAuthUser};
pub use client::Client;
pub use json::{Body, ValidatedJson};
pub use pagination::PaginationParams;
pub use params::{Params, PathParam};
