//! Quiz leaderboard settings and rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// When a quiz leaderboard opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityType {
    /// Visible as soon as entries exist.
    #[default]
    Instant,
    /// Visible from `scheduled_date`.
    Scheduled,
    /// Visible `delay_hours` after the quiz ends.
    Delayed,
}

/// Leaderboard visibility settings stored with each quiz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardVisibility {
    #[serde(rename = "type", default)]
    pub visibility_type: VisibilityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_hours: Option<u32>,
    /// Only students with an attempt may view the board.
    #[serde(default)]
    pub show_to_participants_only: bool,
}

/// A student's best attempt on a quiz.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuizLeaderboardEntry {
    pub quiz_id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    /// Seconds spent on the best attempt.
    pub time_taken: i32,
    pub submitted_at: DateTime<Utc>,
    pub attempt_id: Uuid,
}
