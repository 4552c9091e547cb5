//! Student portfolio profiles.

pub mod completion;
pub mod service;
pub mod validation;

pub use completion::completion;
pub use service::{ProfileService, ProfileView};
pub use validation::{ProfileUpdate, is_valid_slug, normalize_slug};
