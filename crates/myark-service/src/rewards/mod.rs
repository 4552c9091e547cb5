//! Share-rewards program.

pub mod program;
pub mod service;

pub use program::{RewardEvent, evaluate_reward_badges, validate_config};
pub use service::RewardsService;
