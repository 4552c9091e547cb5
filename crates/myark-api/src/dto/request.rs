//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use myark_database::repositories::ShareFilter;
use myark_entity::gamification::XpAction;
use myark_entity::leaderboard::LeaderboardMetric;
use myark_entity::quiz::model::CreateQuiz;
use myark_entity::quiz::{
    LeaderboardVisibility, QuizQuestion, QuizResponse, QuizSettings, QuizVisibility,
};
use myark_entity::share::{ConversionType, ShareMethod, SharePlatform};
use myark_service::share::NewShare;

/// POST /api/gamification/actions
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordActionRequest {
    pub action: XpAction,
    #[validate(length(min = 1, max = 100, message = "subject must be 1-100 characters"))]
    pub subject: Option<String>,
}

/// POST /api/admin/gamification/{uid}/award
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AwardXpRequest {
    #[validate(range(min = 0, message = "amount must not be negative"))]
    pub amount: i64,
    #[serde(default = "default_award_action")]
    #[validate(length(min = 1, max = 64))]
    pub action: String,
}

fn default_award_action() -> String {
    "admin_award".to_string()
}

/// `?limit=` for leaderboards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

/// `?metric=&limit=` for top performers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopPerformersQuery {
    #[serde(default)]
    pub metric: Option<LeaderboardMetric>,
    pub limit: Option<u32>,
}

/// Create or replace a quiz.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub registration_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(range(min = 0, message = "attemptLimit must not be negative"))]
    pub attempt_limit: i32,
    #[serde(default)]
    pub visibility: QuizVisibility,
    #[validate(length(min = 1, max = 500, message = "a quiz needs 1-500 questions"))]
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub settings: QuizSettings,
    #[serde(default)]
    pub leaderboard_settings: LeaderboardVisibility,
}

impl From<QuizRequest> for CreateQuiz {
    fn from(req: QuizRequest) -> Self {
        CreateQuiz {
            title: req.title.trim().to_string(),
            description: req.description,
            category_id: req.category_id,
            start_date: req.start_date,
            end_date: req.end_date,
            registration_deadline: req.registration_deadline,
            attempt_limit: req.attempt_limit,
            visibility: req.visibility,
            questions: req.questions,
            settings: req.settings,
            leaderboard_settings: req.leaderboard_settings,
        }
    }
}

/// POST /api/quizzes/{id}/submit
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[serde(default)]
    #[validate(length(max = 500))]
    pub responses: Vec<QuizResponse>,
    /// Seconds spent on the attempt.
    #[serde(default)]
    #[validate(range(max = 86_400, message = "timeSpent must be at most one day"))]
    pub time_spent: u32,
}

/// POST /api/shares/record
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordShareRequest {
    #[validate(length(min = 1, max = 128, message = "opportunityId is required"))]
    pub opportunity_id: String,
    #[validate(length(min = 1, max = 300, message = "opportunityTitle is required"))]
    pub opportunity_title: String,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub opportunity_slug: Option<String>,
    pub share_method: ShareMethod,
    pub platform: SharePlatform,
}

impl From<RecordShareRequest> for NewShare {
    fn from(req: RecordShareRequest) -> Self {
        NewShare {
            opportunity_id: req.opportunity_id,
            opportunity_title: req.opportunity_title,
            opportunity_slug: req.opportunity_slug,
            share_method: req.share_method,
            platform: req.platform,
        }
    }
}

/// POST /api/shares/click
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareClickRequest {
    #[validate(length(min = 1, max = 128, message = "shareCode is required"))]
    pub share_code: String,
}

/// POST /api/shares/convert
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareConversionRequest {
    #[validate(length(min = 1, max = 128, message = "shareCode is required"))]
    pub share_code: String,
    pub conversion_type: ConversionType,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// GET /api/shares/analytics
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub opportunity_id: Option<String>,
}

impl From<AnalyticsQuery> for ShareFilter {
    fn from(q: AnalyticsQuery) -> Self {
        ShareFilter {
            start_date: q.start_date,
            end_date: q.end_date,
            opportunity_id: q.opportunity_id.filter(|id| !id.trim().is_empty()),
        }
    }
}
