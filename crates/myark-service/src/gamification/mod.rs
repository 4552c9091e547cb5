//! Gamification: XP, levels, badges, and streaks.

pub mod badges;
pub mod engine;
pub mod levels;
pub mod service;
pub mod streaks;
pub mod subjects;

pub use badges::{BadgeProgress, BadgeStatus, EvaluationStats, RankContext};
pub use engine::{GamificationEngine, GamificationSummary};
pub use levels::LevelCurve;
pub use service::{AwardResult, BadgeOverview, GamificationService};
pub use streaks::update_streaks;
pub use subjects::{SubjectCategory, SubjectCounts};
