//! Daily and weekly activity streaks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakType {
    Daily,
    Weekly,
}

/// One streak counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    #[serde(rename = "type")]
    pub streak_type: StreakType,
    /// Consecutive periods with activity, including the current one.
    #[serde(default)]
    pub current: u32,
    /// Running maximum of `current`.
    #[serde(default)]
    pub best: u32,
    /// Day of the most recent qualifying activity, if any.
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
    /// First day of the current run.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub active: bool,
}

impl Streak {
    /// A streak with no recorded activity.
    pub fn empty(streak_type: StreakType) -> Self {
        Self {
            streak_type,
            current: 0,
            best: 0,
            last_activity_date: None,
            start_date: None,
            active: false,
        }
    }
}

/// Both streaks tracked per student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStreaks {
    pub daily: Streak,
    pub weekly: Streak,
}

impl UserStreaks {
    /// The larger of the daily and weekly best runs.
    pub fn best(&self) -> u32 {
        self.daily.best.max(self.weekly.best)
    }
}

impl Default for UserStreaks {
    fn default() -> Self {
        Self {
            daily: Streak::empty(StreakType::Daily),
            weekly: Streak::empty(StreakType::Weekly),
        }
    }
}
