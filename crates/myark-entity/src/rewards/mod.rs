//! Share-rewards program entities.

pub mod config;
pub mod user;

pub use config::{RewardBadge, RewardBadgeType, RewardConfig};
pub use user::{RewardDelta, UserRewards};
