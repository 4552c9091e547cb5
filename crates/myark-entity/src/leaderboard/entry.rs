//! Leaderboard rows and views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::UserGamification;

/// Metric used to order a top-performers board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMetric {
    #[default]
    Xp,
    Badges,
    Streak,
}

/// A ranked student on a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub uid: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub school_id: Option<String>,
    pub school_name: Option<String>,
    #[serde(rename = "totalXP")]
    pub total_xp: i64,
    pub level: i32,
    pub badge_count: u32,
    pub best_streak: u32,
    /// 1-based position.
    pub rank: u32,
}

impl LeaderboardEntry {
    /// Build an entry from a gamification record at the given rank.
    pub fn from_record(record: &UserGamification, rank: u32) -> Self {
        Self {
            uid: record.uid.clone(),
            display_name: record
                .display_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Student".to_string()),
            photo_url: record.photo_url.clone(),
            school_id: record.school_id.clone(),
            school_name: record.school_name.clone(),
            total_xp: record.total_xp,
            level: record.level,
            badge_count: record.badge_count() as u32,
            best_streak: record.streaks.best(),
            rank,
        }
    }
}

/// A school-scoped leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolLeaderboard {
    pub school_id: String,
    pub school_name: String,
    pub entries: Vec<LeaderboardEntry>,
    pub generated_at: DateTime<Utc>,
}

/// A student's current ranks; `None` when the student has no record or no
/// school.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRanks {
    pub global_rank: Option<u32>,
    pub school_rank: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_name_fallback() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut record = UserGamification::new("u1", None, now);
        record.display_name = Some("  ".into());
        let entry = LeaderboardEntry::from_record(&record, 4);
        assert_eq!(entry.display_name, "Student");
        assert_eq!(entry.rank, 4);
        assert_eq!(entry.level, 1);
    }
}
