//! Share-rewards program service.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use myark_core::error::AppError;
use myark_database::repositories::RewardsRepository;
use myark_entity::rewards::{RewardConfig, RewardDelta, UserRewards};

use super::program::{RewardEvent, evaluate_reward_badges, validate_config};

/// Reads and edits the reward config and keeps user reward totals.
#[derive(Debug, Clone)]
pub struct RewardsService {
    repo: Arc<RewardsRepository>,
}

impl RewardsService {
    /// Creates a new rewards service.
    pub fn new(repo: Arc<RewardsRepository>) -> Self {
        Self { repo }
    }

    /// The stored config, or the built-in defaults.
    pub async fn config(&self) -> Result<RewardConfig, AppError> {
        Ok(self.repo.find_config().await?.unwrap_or_default())
    }

    /// Replace the config.
    pub async fn update_config(&self, config: RewardConfig) -> Result<RewardConfig, AppError> {
        validate_config(&config).map_err(AppError::validation)?;
        self.repo.save_config(&config, Utc::now()).await?;
        info!(
            enabled = config.enabled,
            per_share = config.points_per_share,
            per_click = config.points_per_click,
            per_conversion = config.points_per_conversion,
            "Reward config updated"
        );
        Ok(config)
    }

    /// Credit a share event to `user_id`.
    pub async fn record_event(
        &self,
        user_id: &str,
        event: RewardEvent,
    ) -> Result<UserRewards, AppError> {
        let delta = event.delta(&self.config().await?);
        self.update_user_rewards(user_id, delta).await
    }

    /// Add `delta` to a user's totals and award any reward badges reached.
    pub async fn update_user_rewards(
        &self,
        user_id: &str,
        delta: RewardDelta,
    ) -> Result<UserRewards, AppError> {
        let config = self.config().await?;
        self.apply(user_id, &config, delta).await
    }

    /// The caller's totals with a freshly derived rank.
    pub async fn my_rewards(&self, user_id: &str) -> Result<UserRewards, AppError> {
        let Some(mut rewards) = self.repo.find_user(user_id).await? else {
            return Ok(UserRewards::empty(user_id, Utc::now()));
        };
        let rank = self.repo.rank_by_points(rewards.total_points).await?;
        rewards.rank = Some(i32::try_from(rank).unwrap_or(i32::MAX));
        Ok(rewards)
    }

    async fn apply(
        &self,
        user_id: &str,
        config: &RewardConfig,
        delta: RewardDelta,
    ) -> Result<UserRewards, AppError> {
        let now = Utc::now();
        let award_points = config.enabled;
        let badges = config.badges.clone();

        let mut new_badges = Vec::new();
        let updated = self
            .repo
            .update_with(user_id, now, |rewards| {
                rewards.apply(&delta, award_points, now);
                new_badges = evaluate_reward_badges(rewards, &badges);
            })
            .await?;

        // Rank depends on everyone's points, so it is refreshed after the write.
        let rank = i32::try_from(self.repo.rank_by_points(updated.total_points).await?)
            .unwrap_or(i32::MAX);
        let updated = if updated.rank != Some(rank) {
            self.repo
                .update_with(user_id, now, |rewards| {
                    rewards.rank = Some(rank);
                    new_badges.extend(evaluate_reward_badges(rewards, &badges));
                })
                .await?
        } else {
            updated
        };

        if !new_badges.is_empty() {
            info!(user_id = %user_id, badges = ?new_badges, "Reward badges earned");
        }
        Ok(updated)
    }
}
