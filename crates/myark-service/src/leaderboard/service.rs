//! Global, school, and top-performer leaderboards.

use std::sync::Arc;

use chrono::Utc;

use myark_core::config::LeaderboardConfig;
use myark_core::error::AppError;
use myark_database::repositories::GamificationRepository;
use myark_entity::gamification::UserGamification;
use myark_entity::leaderboard::{LeaderboardEntry, LeaderboardMetric, SchoolLeaderboard, UserRanks};

use super::ranking::{assign_ranks, clamp_limit};

/// Builds leaderboards and derives ranks from the gamification records.
///
/// Ranks are computed on every read; nothing is cached.
#[derive(Debug, Clone)]
pub struct LeaderboardService {
    repo: Arc<GamificationRepository>,
    config: LeaderboardConfig,
}

impl LeaderboardService {
    /// Creates a new leaderboard service.
    pub fn new(repo: Arc<GamificationRepository>, config: LeaderboardConfig) -> Self {
        Self { repo, config }
    }

    /// Top students platform-wide by XP.
    pub async fn global(&self, limit: Option<u32>) -> Result<Vec<LeaderboardEntry>, AppError> {
        let limit = clamp_limit(limit, self.config.global_top_n, self.config.max_top_n);
        let records = self.repo.top_by_xp(None, i64::from(limit)).await?;
        Ok(assign_ranks(&records))
    }

    /// Top students of one school by XP.
    pub async fn school(
        &self,
        school_id: &str,
        limit: Option<u32>,
    ) -> Result<SchoolLeaderboard, AppError> {
        let limit = clamp_limit(limit, self.config.school_top_n, self.config.max_top_n);
        let records = self.repo.top_by_xp(Some(school_id), i64::from(limit)).await?;
        let school_name = records
            .first()
            .and_then(|r| r.school_name.clone())
            .unwrap_or_else(|| "School".to_string());
        Ok(SchoolLeaderboard {
            school_id: school_id.to_string(),
            school_name,
            entries: assign_ranks(&records),
            generated_at: Utc::now(),
        })
    }

    /// Top students by the chosen metric.
    pub async fn top_performers(
        &self,
        metric: LeaderboardMetric,
        limit: Option<u32>,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let limit = clamp_limit(limit, self.config.global_top_n, self.config.max_top_n);
        let records = self.repo.top_by_metric(metric, i64::from(limit)).await?;
        Ok(assign_ranks(&records))
    }

    /// A student's global and school rank; both `None` without a record.
    pub async fn user_ranks(&self, uid: &str) -> Result<UserRanks, AppError> {
        match self.repo.find_by_uid(uid).await? {
            Some(record) => self.ranks_for_record(&record).await,
            None => Ok(UserRanks::default()),
        }
    }

    /// Ranks for an already loaded record.
    pub async fn ranks_for_record(&self, record: &UserGamification) -> Result<UserRanks, AppError> {
        let global_above = self.repo.count_above(record.total_xp, None).await?;
        let school_rank = match record.school_id.as_deref() {
            Some(school) => Some(to_rank(self.repo.count_above(record.total_xp, Some(school)).await?)),
            None => None,
        };
        Ok(UserRanks {
            global_rank: Some(to_rank(global_above)),
            school_rank,
        })
    }
}

fn to_rank(above: i64) -> u32 {
    u32::try_from(above).unwrap_or(u32::MAX - 1).saturating_add(1)
}
