//! Share-rewards repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use myark_core::error::{AppError, ErrorKind};
use myark_core::result::AppResult;
use myark_entity::rewards::{RewardConfig, UserRewards};

/// Repository for the reward config singleton and per-user totals.
#[derive(Debug, Clone)]
pub struct RewardsRepository {
    pool: PgPool,
}

impl RewardsRepository {
    /// Create a new rewards repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The stored reward config, if one was ever saved.
    pub async fn find_config(&self) -> AppResult<Option<RewardConfig>> {
        let row: Option<Json<RewardConfig>> =
            sqlx::query_scalar("SELECT config FROM reward_config WHERE id = 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load reward config", e)
                })?;
        Ok(row.map(|Json(config)| config))
    }

    /// Replace the reward config.
    pub async fn save_config(&self, config: &RewardConfig, now: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO reward_config (id, config, updated_at) VALUES (1, $1, $2) \
             ON CONFLICT (id) DO UPDATE SET config = EXCLUDED.config, updated_at = EXCLUDED.updated_at",
        )
        .bind(Json(config))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save reward config", e))?;
        Ok(())
    }

    /// Find a user's reward totals.
    pub async fn find_user(&self, user_id: &str) -> AppResult<Option<UserRewards>> {
        sqlx::query_as::<_, UserRewards>("SELECT * FROM user_rewards WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find rewards", e))
    }

    /// Atomically read, modify and write a user's totals, creating the row
    /// when missing.
    pub async fn update_with<F>(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        apply: F,
    ) -> AppResult<UserRewards>
    where
        F: FnOnce(&mut UserRewards) + Send,
    {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            "INSERT INTO user_rewards (user_id, last_updated) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create rewards", e))?;

        let mut rewards = sqlx::query_as::<_, UserRewards>(
            "SELECT * FROM user_rewards WHERE user_id = $1 FOR UPDATE",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock rewards", e))?;

        apply(&mut rewards);

        let updated = sqlx::query_as::<_, UserRewards>(
            "UPDATE user_rewards SET total_points = $2, total_shares = $3, total_clicks = $4, \
             total_conversions = $5, badges = $6, rank = $7, last_updated = $8 \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(&rewards.user_id)
        .bind(rewards.total_points)
        .bind(rewards.total_shares)
        .bind(rewards.total_clicks)
        .bind(rewards.total_conversions)
        .bind(&rewards.badges)
        .bind(rewards.rank)
        .bind(rewards.last_updated)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update rewards", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit rewards", e)
        })?;
        Ok(updated)
    }

    /// 1 + the number of users with strictly more points.
    pub async fn rank_by_points(&self, total_points: i64) -> AppResult<u32> {
        let above: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_rewards WHERE total_points > $1")
                .bind(total_points)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to compute reward rank", e)
                })?;
        Ok(u32::try_from(above).unwrap_or(u32::MAX - 1).saturating_add(1))
    }
}
