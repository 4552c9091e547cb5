//! Quiz, registration, attempt and quiz-leaderboard repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use myark_core::error::{AppError, ErrorKind};
use myark_core::result::AppResult;
use myark_core::types::pagination::{PageRequest, PageResponse};
use myark_entity::quiz::model::CreateQuiz;
use myark_entity::quiz::{Quiz, QuizAttempt, QuizLeaderboardEntry, QuizRegistration};

use super::is_unique_violation;

/// Repository for quizzes and everything hanging off them.
#[derive(Debug, Clone)]
pub struct QuizRepository {
    pool: PgPool,
}

impl QuizRepository {
    /// Create a new quiz repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a quiz by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Quiz>> {
        sqlx::query_as::<_, Quiz>("SELECT * FROM quizzes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find quiz", e))
    }

    /// Insert a new quiz.
    pub async fn create(&self, id: Uuid, data: &CreateQuiz, now: DateTime<Utc>) -> AppResult<Quiz> {
        sqlx::query_as::<_, Quiz>(
            "INSERT INTO quizzes (id, title, description, category_id, start_date, end_date, \
             registration_deadline, attempt_limit, visibility, questions, settings, \
             leaderboard_settings, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13) RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.category_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.registration_deadline)
        .bind(data.attempt_limit)
        .bind(data.visibility)
        .bind(Json(&data.questions))
        .bind(Json(&data.settings))
        .bind(Json(&data.leaderboard_settings))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create quiz", e))
    }

    /// Replace a quiz definition, keeping its counters.
    pub async fn update(
        &self,
        id: Uuid,
        data: &CreateQuiz,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Quiz>> {
        sqlx::query_as::<_, Quiz>(
            "UPDATE quizzes SET title = $2, description = $3, category_id = $4, start_date = $5, \
             end_date = $6, registration_deadline = $7, attempt_limit = $8, visibility = $9, \
             questions = $10, settings = $11, leaderboard_settings = $12, updated_at = $13 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.category_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.registration_deadline)
        .bind(data.attempt_limit)
        .bind(data.visibility)
        .bind(Json(&data.questions))
        .bind(Json(&data.settings))
        .bind(Json(&data.leaderboard_settings))
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update quiz", e))
    }

    /// Delete a quiz. Registrations, attempts and leaderboard rows go with it.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete quiz", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the view counter.
    pub async fn increment_views(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE quizzes SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to record quiz view", e)
            })?;
        Ok(())
    }

    /// Find a student's registration for a quiz.
    pub async fn find_registration(
        &self,
        quiz_id: Uuid,
        user_id: &str,
    ) -> AppResult<Option<QuizRegistration>> {
        sqlx::query_as::<_, QuizRegistration>(
            "SELECT * FROM quiz_registrations WHERE quiz_id = $1 AND user_id = $2",
        )
        .bind(quiz_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find registration", e))
    }

    /// Register a student. Returns the registration and whether it already
    /// existed; the quiz counter only moves for new registrations.
    pub async fn register(
        &self,
        registration: &QuizRegistration,
    ) -> AppResult<(QuizRegistration, bool)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let inserted = sqlx::query_as::<_, QuizRegistration>(
            "INSERT INTO quiz_registrations (id, quiz_id, user_id, user_name, user_email, registered_at) \
             VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (quiz_id, user_id) DO NOTHING RETURNING *",
        )
        .bind(registration.id)
        .bind(registration.quiz_id)
        .bind(&registration.user_id)
        .bind(&registration.user_name)
        .bind(&registration.user_email)
        .bind(registration.registered_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to register for quiz", e))?;

        let result = match inserted {
            Some(row) => {
                sqlx::query(
                    "UPDATE quizzes SET registration_count = registration_count + 1 WHERE id = $1",
                )
                .bind(registration.quiz_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to update registration count",
                        e,
                    )
                })?;
                (row, false)
            }
            None => {
                let existing = sqlx::query_as::<_, QuizRegistration>(
                    "SELECT * FROM quiz_registrations WHERE quiz_id = $1 AND user_id = $2",
                )
                .bind(registration.quiz_id)
                .bind(&registration.user_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load registration", e)
                })?;
                (existing, true)
            }
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit registration", e)
        })?;
        Ok(result)
    }

    /// Number of attempts a student has made on a quiz.
    pub async fn count_attempts(&self, quiz_id: Uuid, user_id: &str) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM quiz_attempts WHERE quiz_id = $1 AND user_id = $2",
        )
        .bind(quiz_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count attempts", e))
    }

    /// Store an evaluated attempt.
    ///
    /// In one transaction: assigns the next attempt number, enforces
    /// `attempt_limit` (0 = unlimited), keeps the student's best score on the
    /// quiz leaderboard and bumps the submission counter. A concurrent
    /// submission racing for the same attempt number surfaces as `Conflict`.
    pub async fn submit_attempt(
        &self,
        mut attempt: QuizAttempt,
        attempt_limit: i32,
    ) -> AppResult<QuizAttempt> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let previous = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM quiz_attempts WHERE quiz_id = $1 AND user_id = $2",
        )
        .bind(attempt.quiz_id)
        .bind(&attempt.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count attempts", e))?;

        if attempt_limit > 0 && previous >= i64::from(attempt_limit) {
            return Err(AppError::conflict(format!(
                "Attempt limit of {attempt_limit} reached"
            )));
        }
        attempt.attempt_number = i32::try_from(previous + 1)
            .map_err(|_| AppError::conflict("Too many attempts"))?;

        let stored = sqlx::query_as::<_, QuizAttempt>(
            "INSERT INTO quiz_attempts (id, quiz_id, user_id, user_name, user_email, attempt_number, \
             started_at, submitted_at, time_spent, responses, score, max_score, percentage, passed, \
             evaluated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING *",
        )
        .bind(attempt.id)
        .bind(attempt.quiz_id)
        .bind(&attempt.user_id)
        .bind(&attempt.user_name)
        .bind(&attempt.user_email)
        .bind(attempt.attempt_number)
        .bind(attempt.started_at)
        .bind(attempt.submitted_at)
        .bind(attempt.time_spent)
        .bind(&attempt.responses)
        .bind(attempt.score)
        .bind(attempt.max_score)
        .bind(attempt.percentage)
        .bind(attempt.passed)
        .bind(attempt.evaluated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Another submission for this attempt is in progress")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to store attempt", e)
            }
        })?;

        sqlx::query(
            "INSERT INTO quiz_leaderboard (quiz_id, user_id, user_name, score, max_score, \
             percentage, time_taken, submitted_at, attempt_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (quiz_id, user_id) DO UPDATE SET user_name = EXCLUDED.user_name, \
             score = EXCLUDED.score, max_score = EXCLUDED.max_score, \
             percentage = EXCLUDED.percentage, time_taken = EXCLUDED.time_taken, \
             submitted_at = EXCLUDED.submitted_at, attempt_id = EXCLUDED.attempt_id \
             WHERE quiz_leaderboard.score < EXCLUDED.score",
        )
        .bind(stored.quiz_id)
        .bind(&stored.user_id)
        .bind(&stored.user_name)
        .bind(stored.score)
        .bind(stored.max_score)
        .bind(stored.percentage)
        .bind(stored.time_spent)
        .bind(stored.submitted_at)
        .bind(stored.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update quiz leaderboard", e)
        })?;

        sqlx::query("UPDATE quizzes SET submission_count = submission_count + 1 WHERE id = $1")
            .bind(stored.quiz_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update submission count", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit attempt", e)
        })?;
        Ok(stored)
    }

    /// Best-score rows for a quiz, highest score first, faster first on ties.
    pub async fn leaderboard(&self, quiz_id: Uuid) -> AppResult<Vec<QuizLeaderboardEntry>> {
        sqlx::query_as::<_, QuizLeaderboardEntry>(
            "SELECT * FROM quiz_leaderboard WHERE quiz_id = $1 \
             ORDER BY score DESC, time_taken ASC, submitted_at ASC",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load quiz leaderboard", e)
        })
    }

    /// List registrations for a quiz, newest first.
    pub async fn list_registrations(
        &self,
        quiz_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<QuizRegistration>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM quiz_registrations WHERE quiz_id = $1")
                .bind(quiz_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count registrations", e)
                })?;

        let rows = sqlx::query_as::<_, QuizRegistration>(
            "SELECT * FROM quiz_registrations WHERE quiz_id = $1 \
             ORDER BY registered_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(quiz_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list registrations", e))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            u64::try_from(total).unwrap_or(0),
        ))
    }

    /// List attempts for a quiz, newest first.
    pub async fn list_attempts(
        &self,
        quiz_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<QuizAttempt>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_attempts WHERE quiz_id = $1")
            .bind(quiz_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count attempts", e))?;

        let rows = sqlx::query_as::<_, QuizAttempt>(
            "SELECT * FROM quiz_attempts WHERE quiz_id = $1 \
             ORDER BY submitted_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(quiz_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attempts", e))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            u64::try_from(total).unwrap_or(0),
        ))
    }
}
