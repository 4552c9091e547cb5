//! Quiz definition entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::leaderboard::LeaderboardVisibility;

/// Publication state of a quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "quiz_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuizVisibility {
    #[default]
    Draft,
    Scheduled,
    Published,
}

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
}

/// One answer option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// One quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<QuizOption>,
    pub marks: f64,
    #[serde(default)]
    pub negative_marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl QuizQuestion {
    /// Sorted ids of the correct options.
    pub fn correct_option_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Attempt and scoring settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizSettings {
    /// Time allowed, in minutes.
    pub total_duration: u32,
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
    pub show_instant_results: bool,
    pub allow_review: bool,
    pub show_explanations: bool,
    pub enable_negative_marking: bool,
    pub passing_percentage: Option<f64>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            total_duration: 30,
            shuffle_questions: false,
            shuffle_options: false,
            show_instant_results: true,
            allow_review: true,
            show_explanations: true,
            enable_negative_marking: false,
            passing_percentage: None,
        }
    }
}

/// A quiz opportunity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Maximum attempts per student; 0 means unlimited.
    pub attempt_limit: i32,
    pub visibility: QuizVisibility,
    pub questions: Json<Vec<QuizQuestion>>,
    pub settings: Json<QuizSettings>,
    pub leaderboard_settings: Json<LeaderboardVisibility>,
    pub registration_count: i32,
    pub submission_count: i32,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Sum of marks across all questions.
    pub fn total_marks(&self) -> f64 {
        self.questions.iter().map(|q| q.marks).sum()
    }

    /// Number of questions.
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Whether registration is closed at `now`.
    pub fn registration_closed(&self, now: DateTime<Utc>) -> bool {
        self.registration_deadline.is_some_and(|deadline| now > deadline)
    }

    /// Whether another attempt is allowed after `previous` attempts.
    pub fn allows_attempt(&self, previous: i64) -> bool {
        self.attempt_limit <= 0 || previous < i64::from(self.attempt_limit)
    }
}

/// Data required to create or replace a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuiz {
    pub title: String,
    pub description: String,
    pub category_id: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub attempt_limit: i32,
    pub visibility: QuizVisibility,
    pub questions: Vec<QuizQuestion>,
    pub settings: QuizSettings,
    pub leaderboard_settings: LeaderboardVisibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_json_shape() {
        let raw = r#"{
            "id": "q1",
            "questionText": "2 + 2?",
            "type": "single-choice",
            "options": [
                {"id": "b", "text": "4", "isCorrect": true},
                {"id": "a", "text": "5"}
            ],
            "marks": 4
        }"#;
        let q: QuizQuestion = serde_json::from_str(raw).unwrap();
        assert_eq!(q.question_type, QuestionType::SingleChoice);
        assert_eq!(q.negative_marks, 0.0);
        assert_eq!(q.correct_option_ids(), vec!["b"]);
    }

    #[test]
    fn test_settings_defaults() {
        let s: QuizSettings = serde_json::from_str(r#"{"enableNegativeMarking": true}"#).unwrap();
        assert!(s.enable_negative_marking);
        assert_eq!(s.total_duration, 30);
        assert!(s.passing_percentage.is_none());
    }
}
