//! Leaderboards and rank derivation.

pub mod ranking;
pub mod service;

pub use ranking::{assign_ranks, clamp_limit};
pub use service::LeaderboardService;
