//! Gamification use cases over the persisted record.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use myark_core::error::AppError;
use myark_database::repositories::GamificationRepository;
use myark_entity::gamification::{
    BadgeDefinition, BadgeName, EarnedBadge, ProfileSync, UserGamification, XpAction,
};

use super::badges::{BadgeProgress, RankContext};
use super::engine::{GamificationEngine, GamificationSummary};
use super::streaks::update_streaks;
use crate::leaderboard::LeaderboardService;

/// Outcome of an XP award.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardResult {
    pub record: UserGamification,
    pub xp_awarded: u64,
    pub new_badges: Vec<EarnedBadge>,
    pub leveled_up: bool,
}

/// Earned badges plus progress towards the rest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeOverview {
    pub earned: Vec<EarnedBadge>,
    pub progress: Vec<BadgeProgress>,
}

/// Awards XP and badges and keeps streaks current.
#[derive(Debug, Clone)]
pub struct GamificationService {
    repo: Arc<GamificationRepository>,
    engine: Arc<GamificationEngine>,
    leaderboard: Arc<LeaderboardService>,
}

impl GamificationService {
    /// Creates a new gamification service.
    pub fn new(
        repo: Arc<GamificationRepository>,
        engine: Arc<GamificationEngine>,
        leaderboard: Arc<LeaderboardService>,
    ) -> Self {
        Self {
            repo,
            engine,
            leaderboard,
        }
    }

    /// The caller's record, created with defaults on first access.
    pub async fn get_or_create(&self, uid: &str) -> Result<UserGamification, AppError> {
        self.repo.get_or_create(uid, None, Utc::now()).await
    }

    /// Award `amount` XP.
    ///
    /// Negative amounts are rejected: XP only ever grows.
    pub async fn award_xp(
        &self,
        uid: &str,
        amount: i64,
        reason: &str,
    ) -> Result<AwardResult, AppError> {
        let amount = u64::try_from(amount)
            .map_err(|_| AppError::validation("XP amount must not be negative"))?;
        self.apply(uid, reason, amount, |_, _| {}).await
    }

    /// Record a student action: bump its counter and award its XP in one
    /// transaction.
    pub async fn record_action(
        &self,
        uid: &str,
        action: XpAction,
        subject: Option<&str>,
    ) -> Result<AwardResult, AppError> {
        let amount = self.engine.xp_for(action);
        let subject = subject.map(str::to_string);
        self.apply(uid, action.as_str(), amount, move |engine, record| {
            engine.apply_action(record, action, subject.as_deref());
        })
        .await
    }

    async fn apply<F>(
        &self,
        uid: &str,
        reason: &str,
        amount: u64,
        before: F,
    ) -> Result<AwardResult, AppError>
    where
        F: FnOnce(&GamificationEngine, &mut UserGamification) + Send,
    {
        let now = Utc::now();
        let engine = Arc::clone(&self.engine);
        let (record, (new_badges, previous_level)) = self
            .repo
            .update_with(uid, None, now, move |record| {
                let previous_level = record.level;
                before(&engine, record);
                let mut badges = engine.award_xp(record, amount, RankContext::default(), now);
                update_streaks(record, true, now.date_naive(), now);
                badges.extend(engine.evaluate_badges(record, RankContext::default(), now));
                Ok((badges, previous_level))
            })
            .await?;

        let leveled_up = record.level > previous_level;
        info!(
            uid = %uid,
            reason = %reason,
            amount,
            total_xp = record.total_xp,
            level = record.level,
            new_badges = new_badges.len(),
            "XP awarded"
        );
        for badge in &new_badges {
            info!(uid = %uid, badge = %badge.id, "Badge earned");
        }

        Ok(AwardResult {
            record,
            xp_awarded: amount,
            new_badges,
            leveled_up,
        })
    }

    /// Overwrite the denormalized profile fields, clearing any the profile
    /// no longer has, and award any badges they unlock.
    pub async fn sync_profile(
        &self,
        uid: &str,
        sync: ProfileSync,
    ) -> Result<Vec<EarnedBadge>, AppError> {
        let now = Utc::now();
        let school_id = sync.school_id.clone();
        let ranks = self.rank_context(uid, Some(school_id.as_deref())).await?;
        let engine = Arc::clone(&self.engine);
        let (_, badges) = self
            .repo
            .update_with(uid, school_id.as_deref(), now, move |record| {
                record.apply_profile_sync(sync);
                Ok(engine.evaluate_badges(record, ranks, now))
            })
            .await?;
        Ok(badges)
    }

    /// Award rank badges the student currently qualifies for.
    pub async fn evaluate_rank_badges(&self, uid: &str) -> Result<Vec<EarnedBadge>, AppError> {
        let now = Utc::now();
        let ranks = self.rank_context(uid, None).await?;
        let engine = Arc::clone(&self.engine);
        let (_, badges) = self
            .repo
            .update_with(uid, None, now, move |record| {
                Ok(engine.evaluate_badges(record, ranks, now))
            })
            .await?;
        Ok(badges)
    }

    /// Summary with current ranks.
    pub async fn summary(&self, uid: &str) -> Result<GamificationSummary, AppError> {
        let record = self.get_or_create(uid).await?;
        let ranks = self.leaderboard.ranks_for_record(&record).await?;
        Ok(self.engine.summary(&record, ranks.into()))
    }

    /// Earned badges and progress on the rest.
    pub async fn badges(&self, uid: &str) -> Result<BadgeOverview, AppError> {
        let record = self.get_or_create(uid).await?;
        let ranks = self.leaderboard.ranks_for_record(&record).await?;
        Ok(BadgeOverview {
            earned: record.badges.0.clone(),
            progress: self.engine.badge_progress(&record, ranks.into()),
        })
    }

    /// Every badge definition.
    pub fn catalogue(&self) -> Vec<BadgeDefinition> {
        BadgeName::ALL.iter().map(|b| b.definition()).collect()
    }

    /// Ranks for `uid`. `school_override` replaces the stored school,
    /// including with no school at all.
    async fn rank_context(
        &self,
        uid: &str,
        school_override: Option<Option<&str>>,
    ) -> Result<RankContext, AppError> {
        let Some(mut record) = self.repo.find_by_uid(uid).await? else {
            return Ok(RankContext::default());
        };
        if let Some(school) = school_override {
            record.school_id = school.map(str::to_string);
        }
        Ok(self.leaderboard.ranks_for_record(&record).await?.into())
    }
}
