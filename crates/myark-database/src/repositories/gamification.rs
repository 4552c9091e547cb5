//! Gamification record repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use myark_core::error::{AppError, ErrorKind};
use myark_core::result::AppResult;
use myark_entity::gamification::{UserGamification, UserStreaks};
use myark_entity::leaderboard::LeaderboardMetric;

/// Repository for per-student XP, badge and streak records.
#[derive(Debug, Clone)]
pub struct GamificationRepository {
    pool: PgPool,
}

impl GamificationRepository {
    /// Create a new gamification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a record by user id.
    pub async fn find_by_uid(&self, uid: &str) -> AppResult<Option<UserGamification>> {
        sqlx::query_as::<_, UserGamification>("SELECT * FROM user_gamification WHERE uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find gamification record", e)
            })
    }

    /// Return the record, creating a zeroed one when absent.
    pub async fn get_or_create(
        &self,
        uid: &str,
        school_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<UserGamification> {
        sqlx::query(
            "INSERT INTO user_gamification (uid, streaks, school_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) ON CONFLICT (uid) DO NOTHING",
        )
        .bind(uid)
        .bind(Json(UserStreaks::default()))
        .bind(school_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create gamification record", e)
        })?;

        self.find_by_uid(uid)
            .await?
            .ok_or_else(|| AppError::internal(format!("Gamification record for {uid} vanished")))
    }

    /// Atomically read, modify and write one record.
    ///
    /// The row is created if missing and held with `FOR UPDATE` until the
    /// transaction commits, so concurrent writers for the same user
    /// serialize. `apply` runs while the lock is held and its error aborts
    /// the transaction.
    pub async fn update_with<T, F>(
        &self,
        uid: &str,
        school_id: Option<&str>,
        now: DateTime<Utc>,
        apply: F,
    ) -> AppResult<(UserGamification, T)>
    where
        F: FnOnce(&mut UserGamification) -> AppResult<T> + Send,
        T: Send,
    {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            "INSERT INTO user_gamification (uid, streaks, school_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) ON CONFLICT (uid) DO NOTHING",
        )
        .bind(uid)
        .bind(Json(UserStreaks::default()))
        .bind(school_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create gamification record", e)
        })?;

        let mut record = sqlx::query_as::<_, UserGamification>(
            "SELECT * FROM user_gamification WHERE uid = $1 FOR UPDATE",
        )
        .bind(uid)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to lock gamification record", e)
        })?;

        let output = apply(&mut record)?;
        record.updated_at = now;

        let updated = sqlx::query_as::<_, UserGamification>(
            "UPDATE user_gamification SET total_xp = $2, level = $3, badges = $4, streaks = $5, \
             achievement_stats = $6, profile_completion = $7, school_id = $8, school_name = $9, \
             display_name = $10, photo_url = $11, last_xp_update = $12, last_streak_update = $13, \
             updated_at = $14 WHERE uid = $1 RETURNING *",
        )
        .bind(&record.uid)
        .bind(record.total_xp)
        .bind(record.level)
        .bind(&record.badges)
        .bind(&record.streaks)
        .bind(&record.achievement_stats)
        .bind(record.profile_completion)
        .bind(&record.school_id)
        .bind(&record.school_name)
        .bind(&record.display_name)
        .bind(&record.photo_url)
        .bind(record.last_xp_update)
        .bind(record.last_streak_update)
        .bind(record.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update gamification record", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit gamification update", e)
        })?;

        Ok((updated, output))
    }

    /// Records ordered by XP descending, ties broken by uid, optionally
    /// restricted to one school.
    pub async fn top_by_xp(
        &self,
        school_id: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<UserGamification>> {
        sqlx::query_as::<_, UserGamification>(
            "SELECT * FROM user_gamification \
             WHERE ($1::text IS NULL OR school_id = $1) \
             ORDER BY total_xp DESC, uid ASC LIMIT $2",
        )
        .bind(school_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load leaderboard", e))
    }

    /// Records ordered by the given metric descending.
    pub async fn top_by_metric(
        &self,
        metric: LeaderboardMetric,
        limit: i64,
    ) -> AppResult<Vec<UserGamification>> {
        let order = match metric {
            LeaderboardMetric::Xp => "total_xp DESC",
            LeaderboardMetric::Badges => "jsonb_array_length(badges) DESC, total_xp DESC",
            LeaderboardMetric::Streak => {
                "GREATEST(COALESCE((streaks->'daily'->>'best')::int, 0), \
                 COALESCE((streaks->'weekly'->>'best')::int, 0)) DESC, total_xp DESC"
            }
        };
        let sql = format!("SELECT * FROM user_gamification ORDER BY {order}, uid ASC LIMIT $1");

        sqlx::query_as::<_, UserGamification>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load top performers", e)
            })
    }

    /// Number of records with strictly more XP, optionally within a school.
    pub async fn count_above(&self, total_xp: i64, school_id: Option<&str>) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_gamification \
             WHERE total_xp > $1 AND ($2::text IS NULL OR school_id = $2)",
        )
        .bind(total_xp)
        .bind(school_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to compute rank", e))
    }
}
