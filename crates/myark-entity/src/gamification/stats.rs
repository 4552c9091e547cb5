//! Achievement counters that feed badge evaluation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Per-student activity counters. Counters only ever increase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementStats {
    pub opportunities_explored: u32,
    pub opportunities_applied: u32,
    pub opportunities_saved: u32,
    pub certificates_uploaded: u32,
    pub posts_shared: u32,
    pub helpful_actions_count: u32,
    pub achievements_count: u32,
    /// Distinct subject names the student has explored.
    pub subjects_explored: BTreeSet<String>,
    /// Set once a daily streak has been broken and then restarted.
    pub streak_broken_and_restarted: bool,
}

impl AchievementStats {
    /// Record an explored subject. Blank names are ignored.
    pub fn add_subject(&mut self, subject: &str) -> bool {
        let trimmed = subject.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.subjects_explored.insert(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects_are_unique() {
        let mut stats = AchievementStats::default();
        assert!(stats.add_subject("Physics"));
        assert!(!stats.add_subject(" Physics "));
        assert!(!stats.add_subject("   "));
        assert_eq!(stats.subjects_explored.len(), 1);
    }

    #[test]
    fn test_missing_fields_default() {
        let stats: AchievementStats =
            serde_json::from_str(r#"{"opportunitiesExplored": 4}"#).unwrap();
        assert_eq!(stats.opportunities_explored, 4);
        assert_eq!(stats.opportunities_applied, 0);
        assert!(!stats.streak_broken_and_restarted);
    }
}
