//! Share tracking and analytics.

pub mod analytics;
pub mod code;
pub mod hashing;
pub mod service;

pub use analytics::{ShareAnalytics, aggregate, rate};
pub use code::generate_share_code;
pub use hashing::{hash_value, visitor_id};
pub use service::{NewShare, ShareService};
