//! Quiz authoring, registration, submission, and leaderboards.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

use myark_core::config::QuizConfig;
use myark_core::error::AppError;
use myark_core::types::pagination::{PageRequest, PageResponse};
use myark_database::repositories::QuizRepository;
use myark_entity::quiz::model::CreateQuiz;
use myark_entity::quiz::{Quiz, QuizAttempt, QuizLeaderboardEntry, QuizRegistration, QuizResponse};

use super::scoring::evaluate;
use super::visibility::{LeaderboardAccess, check_access};
use crate::context::RequestContext;

/// A quiz with its derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub total_marks: f64,
    pub total_questions: usize,
}

impl From<Quiz> for QuizView {
    fn from(quiz: Quiz) -> Self {
        Self {
            total_marks: quiz.total_marks(),
            total_questions: quiz.total_questions(),
            quiz,
        }
    }
}

/// Result of a registration request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOutcome {
    pub registration: QuizRegistration,
    pub already_registered: bool,
}

/// Whether the caller is registered for a quiz.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStatus {
    pub is_registered: bool,
    pub registered_at: Option<DateTime<Utc>>,
    pub registration_required: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
}

/// Summary returned after a submission is evaluated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub attempt: QuizAttempt,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub unanswered: u32,
    pub total_questions: u32,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub passed: bool,
    /// Seconds.
    pub time_taken: u32,
}

/// A ranked leaderboard row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedQuizEntry {
    pub rank: u32,
    #[serde(flatten)]
    pub entry: QuizLeaderboardEntry,
}

/// A quiz leaderboard that passed the visibility gate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizLeaderboard {
    pub leaderboard: Vec<RankedQuizEntry>,
    pub total_participants: usize,
}

/// Outcome of a leaderboard request.
#[derive(Debug, Clone)]
pub enum LeaderboardOutcome {
    Visible(QuizLeaderboard),
    Locked {
        reason: String,
        visible_at: Option<DateTime<Utc>>,
    },
}

/// Quiz use cases.
#[derive(Debug, Clone)]
pub struct QuizService {
    repo: Arc<QuizRepository>,
    config: QuizConfig,
}

impl QuizService {
    /// Creates a new quiz service.
    pub fn new(repo: Arc<QuizRepository>, config: QuizConfig) -> Self {
        Self { repo, config }
    }

    /// Create a quiz.
    pub async fn create(&self, data: CreateQuiz) -> Result<QuizView, AppError> {
        validate_definition(&data)?;
        let quiz = self.repo.create(Uuid::now_v7(), &data, Utc::now()).await?;
        info!(quiz_id = %quiz.id, title = %quiz.title, "Quiz created");
        Ok(quiz.into())
    }

    /// Replace a quiz definition. Counters are kept.
    pub async fn update(&self, id: Uuid, data: CreateQuiz) -> Result<QuizView, AppError> {
        validate_definition(&data)?;
        let quiz = self
            .repo
            .update(id, &data, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Quiz not found"))?;
        info!(quiz_id = %quiz.id, "Quiz updated");
        Ok(quiz.into())
    }

    /// Delete a quiz with its registrations, attempts, and leaderboard.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Quiz not found"));
        }
        info!(quiz_id = %id, "Quiz deleted");
        Ok(())
    }

    /// Fetch a quiz. `count_view` is false when the viewer has already been
    /// counted this session.
    pub async fn get(&self, id: Uuid, count_view: bool) -> Result<QuizView, AppError> {
        let mut quiz = self.find(id).await?;
        if count_view {
            self.repo.increment_views(id).await?;
            quiz.views += 1;
        }
        Ok(quiz.into())
    }

    /// Register the caller. Registering twice is not an error.
    pub async fn register(
        &self,
        id: Uuid,
        ctx: &RequestContext,
    ) -> Result<RegistrationOutcome, AppError> {
        let quiz = self.find(id).await?;
        if quiz.registration_closed(ctx.request_time) {
            return Err(AppError::validation("Registration deadline has passed"));
        }

        let registration = QuizRegistration {
            id: Uuid::now_v7(),
            quiz_id: id,
            user_id: ctx.user_id.clone(),
            user_name: participant_name(ctx),
            user_email: ctx.email.clone(),
            registered_at: ctx.request_time,
        };
        let (registration, already_registered) = self.repo.register(&registration).await?;
        if !already_registered {
            info!(quiz_id = %id, user_id = %ctx.user_id, "Registered for quiz");
        }
        Ok(RegistrationOutcome {
            registration,
            already_registered,
        })
    }

    /// The caller's registration state.
    pub async fn registration_status(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<RegistrationStatus, AppError> {
        let quiz = self.find(id).await?;
        let registration = self.repo.find_registration(id, user_id).await?;
        Ok(RegistrationStatus {
            is_registered: registration.is_some(),
            registered_at: registration.map(|r| r.registered_at),
            registration_required: quiz.registration_deadline.is_some(),
            registration_deadline: quiz.registration_deadline,
        })
    }

    /// Evaluate and store a submission.
    pub async fn submit(
        &self,
        id: Uuid,
        ctx: &RequestContext,
        responses: Vec<QuizResponse>,
        time_spent: u32,
    ) -> Result<QuizResult, AppError> {
        let quiz = self.find(id).await?;

        let previous = self.repo.count_attempts(id, &ctx.user_id).await?;
        if !quiz.allows_attempt(previous) {
            return Err(AppError::conflict(format!(
                "Attempt limit of {} reached",
                quiz.attempt_limit
            )));
        }

        let scored = evaluate(&quiz.questions, &quiz.settings, responses);
        let now = ctx.request_time;
        let attempt = QuizAttempt {
            id: Uuid::now_v7(),
            quiz_id: id,
            user_id: ctx.user_id.clone(),
            user_name: participant_name(ctx),
            user_email: ctx.email.clone(),
            attempt_number: 0,
            started_at: now - Duration::seconds(i64::from(time_spent)),
            submitted_at: now,
            time_spent: i32::try_from(time_spent).unwrap_or(i32::MAX),
            responses: Json(scored.responses),
            score: scored.score,
            max_score: scored.max_score,
            percentage: scored.percentage,
            passed: scored.passed,
            evaluated_at: now,
        };
        let attempt = self.repo.submit_attempt(attempt, quiz.attempt_limit).await?;

        info!(
            quiz_id = %id,
            user_id = %ctx.user_id,
            attempt = attempt.attempt_number,
            score = attempt.score,
            max_score = attempt.max_score,
            "Quiz submitted"
        );

        Ok(QuizResult {
            attempt,
            correct_answers: scored.correct,
            incorrect_answers: scored.incorrect,
            unanswered: scored.unanswered,
            total_questions: scored.total_questions,
            score: scored.score,
            max_score: scored.max_score,
            percentage: scored.percentage,
            passed: scored.passed,
            time_taken: time_spent,
        })
    }

    /// The quiz leaderboard, subject to its visibility settings.
    pub async fn leaderboard(
        &self,
        id: Uuid,
        viewer: Option<&str>,
    ) -> Result<LeaderboardOutcome, AppError> {
        let quiz = self.find(id).await?;

        let has_attempted = match viewer {
            Some(user_id) if quiz.leaderboard_settings.show_to_participants_only => {
                self.repo.count_attempts(id, user_id).await? > 0
            }
            Some(_) => true,
            None => false,
        };

        let access = check_access(
            &quiz.leaderboard_settings,
            quiz.end_date,
            Utc::now(),
            has_attempted,
            self.config.default_delay_hours,
        );
        if let LeaderboardAccess::Locked { reason, visible_at } = access {
            return Ok(LeaderboardOutcome::Locked { reason, visible_at });
        }

        let leaderboard = rank_entries(self.repo.leaderboard(id).await?);
        Ok(LeaderboardOutcome::Visible(QuizLeaderboard {
            total_participants: leaderboard.len(),
            leaderboard,
        }))
    }

    /// Registrations for a quiz, newest first.
    pub async fn list_registrations(
        &self,
        id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<QuizRegistration>, AppError> {
        self.find(id).await?;
        self.repo.list_registrations(id, &page.normalized()).await
    }

    /// Attempts for a quiz, newest first.
    pub async fn list_attempts(
        &self,
        id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<QuizAttempt>, AppError> {
        self.find(id).await?;
        self.repo.list_attempts(id, &page.normalized()).await
    }

    async fn find(&self, id: Uuid) -> Result<Quiz, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Quiz not found"))
    }
}

/// Name stored on registrations and attempts: token name, then the local
/// part of the email, then "User".
fn participant_name(ctx: &RequestContext) -> String {
    ctx.name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .or_else(|| {
            ctx.email
                .as_deref()
                .and_then(|e| e.split('@').next())
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "User".to_string())
}

/// Assign ranks 1..n to rows already sorted best first.
fn rank_entries(entries: Vec<QuizLeaderboardEntry>) -> Vec<RankedQuizEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RankedQuizEntry {
            rank: u32::try_from(i + 1).unwrap_or(u32::MAX),
            entry,
        })
        .collect()
}

/// Longest delay a delayed leaderboard may wait after the quiz ends.
pub const MAX_LEADERBOARD_DELAY_HOURS: u32 = 8760;

/// Structural checks on a quiz definition.
pub fn validate_definition(data: &CreateQuiz) -> Result<(), AppError> {
    if data.title.trim().is_empty() {
        return Err(AppError::validation("Quiz title is required"));
    }
    if data.end_date < data.start_date {
        return Err(AppError::validation("Quiz end date must not precede its start date"));
    }
    if data.attempt_limit < 0 {
        return Err(AppError::validation("Attempt limit must not be negative"));
    }
    if data
        .leaderboard_settings
        .delay_hours
        .is_some_and(|h| h > MAX_LEADERBOARD_DELAY_HOURS)
    {
        return Err(AppError::validation(format!(
            "Leaderboard delay must be at most {MAX_LEADERBOARD_DELAY_HOURS} hours"
        )));
    }
    if data
        .settings
        .passing_percentage
        .is_some_and(|p| !(0.0..=100.0).contains(&p))
    {
        return Err(AppError::validation("Passing percentage must be between 0 and 100"));
    }

    let mut ids = HashSet::new();
    for question in &data.questions {
        if !ids.insert(question.id.as_str()) {
            return Err(AppError::validation(format!(
                "Duplicate question id '{}'",
                question.id
            )));
        }
        if question.marks < 0.0 || question.negative_marks < 0.0 {
            return Err(AppError::validation(format!(
                "Question '{}' has negative marks",
                question.id
            )));
        }
        if question.options.is_empty() {
            return Err(AppError::validation(format!(
                "Question '{}' has no options",
                question.id
            )));
        }
        if !question.options.iter().any(|o| o.is_correct) {
            return Err(AppError::validation(format!(
                "Question '{}' has no correct option",
                question.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use myark_auth::Role;
    use myark_entity::quiz::{
        LeaderboardVisibility, QuestionType, QuizOption, QuizQuestion, QuizSettings,
        QuizVisibility,
    };

    fn definition() -> CreateQuiz {
        CreateQuiz {
            title: "Science Olympiad Practice".to_string(),
            description: String::new(),
            category_id: None,
            start_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
            registration_deadline: None,
            attempt_limit: 1,
            visibility: QuizVisibility::Published,
            questions: vec![QuizQuestion {
                id: "q1".to_string(),
                question_text: "Water boils at?".to_string(),
                question_type: QuestionType::SingleChoice,
                options: vec![
                    QuizOption {
                        id: "a".to_string(),
                        text: "100C".to_string(),
                        is_correct: true,
                    },
                    QuizOption {
                        id: "b".to_string(),
                        text: "50C".to_string(),
                        is_correct: false,
                    },
                ],
                marks: 2.0,
                negative_marks: 0.0,
                explanation: None,
                order: 1,
            }],
            settings: QuizSettings::default(),
            leaderboard_settings: LeaderboardVisibility::default(),
        }
    }

    fn ctx(name: Option<&str>, email: Option<&str>) -> RequestContext {
        RequestContext {
            user_id: "u1".to_string(),
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            role: Role::Student,
            request_time: Utc::now(),
        }
    }

    #[test]
    fn test_valid_definition_passes() {
        assert!(validate_definition(&definition()).is_ok());
    }

    #[test]
    fn test_definition_rejects_bad_dates_and_duplicates() {
        let mut data = definition();
        data.end_date = data.start_date - Duration::hours(1);
        assert!(validate_definition(&data).is_err());

        let mut data = definition();
        let dup = data.questions[0].clone();
        data.questions.push(dup);
        let err = validate_definition(&data).unwrap_err();
        assert!(err.message.contains("Duplicate"));
    }

    #[test]
    fn test_definition_requires_a_correct_option() {
        let mut data = definition();
        data.questions[0].options[0].is_correct = false;
        assert!(validate_definition(&data).is_err());
    }

    #[test]
    fn test_definition_caps_leaderboard_delay() {
        let mut data = definition();
        data.leaderboard_settings.delay_hours = Some(MAX_LEADERBOARD_DELAY_HOURS);
        assert!(validate_definition(&data).is_ok());

        data.leaderboard_settings.delay_hours = Some(u32::MAX);
        let err = validate_definition(&data).unwrap_err();
        assert!(err.message.contains("Leaderboard delay"));
    }

    #[test]
    fn test_participant_name_fallbacks() {
        assert_eq!(participant_name(&ctx(Some("Asha"), None)), "Asha");
        assert_eq!(participant_name(&ctx(None, Some("ravi@school.in"))), "ravi");
        assert_eq!(participant_name(&ctx(None, None)), "User");
    }
}
