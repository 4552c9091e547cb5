//! Leaderboard domain entities.

pub mod entry;

pub use entry::{LeaderboardEntry, LeaderboardMetric, SchoolLeaderboard, UserRanks};
