//! HTTP request handlers, grouped by resource.

pub mod admin;
pub mod gamification;
pub mod health;
pub mod leaderboard;
pub mod notification;
pub mod profile;
pub mod quiz;
pub mod rewards;
pub mod share;
