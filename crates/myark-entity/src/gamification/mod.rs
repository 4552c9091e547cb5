//! Gamification domain entities.

pub mod action;
pub mod badge;
pub mod model;
pub mod stats;
pub mod streak;

pub use action::XpAction;
pub use badge::{BadgeCategory, BadgeDefinition, BadgeName, BadgeRarity, EarnedBadge};
pub use model::{ProfileSync, UserGamification};
pub use stats::AchievementStats;
pub use streak::{Streak, StreakType, UserStreaks};
