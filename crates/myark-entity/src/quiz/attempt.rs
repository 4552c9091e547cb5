//! Quiz registrations and attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// A student's registration for a quiz.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuizRegistration {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub user_email: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// The answer given to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub question_id: String,
    #[serde(default)]
    pub selected_options: Vec<String>,
    #[serde(default)]
    pub marked_for_review: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks_awarded: Option<f64>,
    /// Seconds spent on this question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u32>,
}

/// An evaluated quiz submission.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub user_email: Option<String>,
    /// 1-based attempt counter for this student.
    pub attempt_number: i32,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    /// Seconds spent.
    pub time_spent: i32,
    pub responses: Json<Vec<QuizResponse>>,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub passed: bool,
    pub evaluated_at: DateTime<Utc>,
}
