//! Per-user reward totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reward totals for one sharer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRewards {
    pub user_id: String,
    pub total_points: i64,
    pub total_shares: i64,
    pub total_clicks: i64,
    pub total_conversions: i64,
    /// Earned reward badge ids, in award order.
    pub badges: Vec<String>,
    /// Position by total points, when known.
    pub rank: Option<i32>,
    pub last_updated: DateTime<Utc>,
}

impl UserRewards {
    /// Zeroed totals for a user with no reward activity.
    pub fn empty(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            total_points: 0,
            total_shares: 0,
            total_clicks: 0,
            total_conversions: 0,
            badges: Vec::new(),
            rank: None,
            last_updated: now,
        }
    }

    /// Add a delta to the counters. Points are added only when `award_points`.
    pub fn apply(&mut self, delta: &RewardDelta, award_points: bool, now: DateTime<Utc>) {
        if award_points {
            let points = i64::try_from(delta.points).unwrap_or(i64::MAX);
            self.total_points = self.total_points.saturating_add(points);
        }
        self.total_shares = self.total_shares.saturating_add(i64::from(delta.shares));
        self.total_clicks = self.total_clicks.saturating_add(i64::from(delta.clicks));
        self.total_conversions = self
            .total_conversions
            .saturating_add(i64::from(delta.conversions));
        self.last_updated = now;
    }
}

/// Increment applied to a user's reward totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewardDelta {
    pub points: u64,
    pub shares: u32,
    pub clicks: u32,
    pub conversions: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_respects_points_flag() {
        let now = Utc::now();
        let mut rewards = UserRewards::empty("u1", now);
        let delta = RewardDelta {
            points: 10,
            shares: 1,
            ..Default::default()
        };
        rewards.apply(&delta, false, now);
        assert_eq!(rewards.total_points, 0);
        assert_eq!(rewards.total_shares, 1);

        rewards.apply(&delta, true, now);
        assert_eq!(rewards.total_points, 10);
        assert_eq!(rewards.total_shares, 2);
    }
}
