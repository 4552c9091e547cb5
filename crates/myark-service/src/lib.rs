//! # myark-service
//!
//! Business logic service layer for Myark. Pure domain rules (level curve,
//! badge predicates, streaks, quiz scoring, leaderboard visibility, share
//! analytics) live next to the services that orchestrate repositories
//! around them.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod gamification;
pub mod leaderboard;
pub mod notification;
pub mod profile;
pub mod quiz;
pub mod rewards;
pub mod share;

pub use context::{ClientInfo, RequestContext};
pub use gamification::{GamificationEngine, GamificationService};
pub use leaderboard::LeaderboardService;
pub use notification::NotificationPreferenceService;
pub use profile::ProfileService;
pub use quiz::QuizService;
pub use rewards::RewardsService;
pub use share::ShareService;
