//! Per-student gamification record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use super::badge::{BadgeName, EarnedBadge};
use super::stats::AchievementStats;
use super::streak::UserStreaks;

/// One row of `user_gamification`.
///
/// `level` is always derived from `total_xp`; `badges` is append-only and
/// unique by badge id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserGamification {
    /// Identity-provider user id.
    pub uid: String,
    #[serde(rename = "totalXP")]
    pub total_xp: i64,
    pub level: i32,
    pub badges: Json<Vec<EarnedBadge>>,
    pub streaks: Json<UserStreaks>,
    pub achievement_stats: Json<AchievementStats>,
    /// Profile completion percent copied from the student profile.
    pub profile_completion: i32,
    pub school_id: Option<String>,
    pub school_name: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    #[serde(rename = "lastXPUpdate")]
    pub last_xp_update: Option<DateTime<Utc>>,
    pub last_streak_update: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserGamification {
    /// A fresh record with zero XP, level 1, and no streak history.
    pub fn new(uid: impl Into<String>, school_id: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            uid: uid.into(),
            total_xp: 0,
            level: 1,
            badges: Json(Vec::new()),
            streaks: Json(UserStreaks::default()),
            achievement_stats: Json(AchievementStats::default()),
            profile_completion: 0,
            school_id,
            school_name: None,
            display_name: None,
            photo_url: None,
            last_xp_update: None,
            last_streak_update: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total XP as an unsigned value.
    pub fn xp(&self) -> u64 {
        u64::try_from(self.total_xp).unwrap_or(0)
    }

    /// Whether the badge has already been earned.
    pub fn has_badge(&self, badge: BadgeName) -> bool {
        self.badges.iter().any(|b| b.id == badge)
    }

    /// Number of badges earned.
    pub fn badge_count(&self) -> usize {
        self.badges.len()
    }

    /// Mirror the profile's denormalized fields. Absent values clear the
    /// stored ones; completion is only replaced when given.
    pub fn apply_profile_sync(&mut self, sync: ProfileSync) {
        self.display_name = sync.display_name;
        self.photo_url = sync.photo_url;
        self.school_id = sync.school_id;
        self.school_name = sync.school_name;
        if let Some(completion) = sync.profile_completion {
            self.profile_completion = completion.clamp(0, 100);
        }
    }

    /// Most recently earned badges, newest first.
    pub fn recent_badges(&self, n: usize) -> Vec<EarnedBadge> {
        let mut badges = self.badges.0.clone();
        badges.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
        badges.truncate(n);
        badges
    }
}

/// Denormalized profile fields copied into the gamification record for
/// leaderboard display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSync {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub school_id: Option<String>,
    pub school_name: Option<String>,
    /// Profile completion percent (0-100).
    pub profile_completion: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_record_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record = UserGamification::new("u1", Some("s1".into()), now);
        assert_eq!(record.level, 1);
        assert_eq!(record.xp(), 0);
        assert_eq!(record.badge_count(), 0);
        assert_eq!(record.streaks.daily.current, 0);
        assert!(record.streaks.daily.last_activity_date.is_none());
    }

    #[test]
    fn test_profile_sync_clears_school_and_photo() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut record = UserGamification::new("u1", Some("s1".into()), now);
        record.school_name = Some("Green Valley".into());
        record.photo_url = Some("https://cdn.example/a.png".into());
        record.profile_completion = 60;

        record.apply_profile_sync(ProfileSync {
            display_name: Some("Asha".into()),
            ..ProfileSync::default()
        });

        assert_eq!(record.display_name.as_deref(), Some("Asha"));
        assert!(record.school_id.is_none());
        assert!(record.school_name.is_none());
        assert!(record.photo_url.is_none());
        assert_eq!(record.profile_completion, 60);
    }

    #[test]
    fn test_profile_sync_clamps_completion() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut record = UserGamification::new("u1", None, now);
        record.apply_profile_sync(ProfileSync {
            profile_completion: Some(140),
            ..ProfileSync::default()
        });
        assert_eq!(record.profile_completion, 100);
    }

    #[test]
    fn test_recent_badges_newest_first() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mut record = UserGamification::new("u1", None, t0);
        record.badges.push(EarnedBadge::new(BadgeName::FirstStep, t0));
        record.badges.push(EarnedBadge::new(BadgeName::ExplorerMode, t1));

        let recent = record.recent_badges(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, BadgeName::ExplorerMode);
        assert!(record.has_badge(BadgeName::FirstStep));
    }

    #[test]
    fn test_serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_value(UserGamification::new("u1", None, now)).unwrap();
        assert_eq!(json["totalXP"], 0);
        assert!(json["achievementStats"]["subjectsExplored"].is_array());
        assert_eq!(json["streaks"]["daily"]["type"], "daily");
    }
}
