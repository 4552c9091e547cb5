//! Reward program configuration.

use serde::{Deserialize, Serialize};

/// Counter a reward badge is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardBadgeType {
    Shares,
    Clicks,
    Conversions,
    /// Leaderboard position; the requirement is the worst qualifying rank.
    Rank,
}

/// A badge in the share-rewards program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardBadge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub requirement: u64,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type")]
    pub badge_type: RewardBadgeType,
}

impl RewardBadge {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        requirement: u64,
        icon: &str,
        badge_type: RewardBadgeType,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            requirement,
            icon: icon.to_string(),
            badge_type,
        }
    }

    /// The built-in badge set.
    pub fn defaults() -> Vec<Self> {
        use RewardBadgeType::*;
        vec![
            Self::new("first-share", "First Share", "Shared your first opportunity", 1, "🎉", Shares),
            Self::new("super-sharer", "Super Sharer", "Shared 10 opportunities", 10, "🌟", Shares),
            Self::new("mega-sharer", "Mega Sharer", "Shared 50 opportunities", 50, "⭐", Shares),
            Self::new("viral-master", "Viral Master", "Generated 100+ total clicks", 100, "🚀", Clicks),
            Self::new("influencer", "Influencer", "Generated 500+ clicks", 500, "💫", Clicks),
            Self::new("converter", "Converter", "Achieved 50+ conversions", 50, "💎", Conversions),
            Self::new("top-performer", "Top Performer", "Reached top 10 on leaderboard", 10, "🏆", Rank),
        ]
    }
}

/// Admin-editable reward settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardConfig {
    pub enabled: bool,
    pub points_per_share: u64,
    pub points_per_click: u64,
    pub points_per_conversion: u64,
    #[serde(default = "RewardBadge::defaults")]
    pub badges: Vec<RewardBadge>,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            points_per_share: 10,
            points_per_click: 2,
            points_per_conversion: 50,
            badges: RewardBadge::defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RewardConfig::default();
        assert!(config.enabled);
        assert_eq!(config.points_per_share, 10);
        assert_eq!(config.points_per_click, 2);
        assert_eq!(config.points_per_conversion, 50);
        assert_eq!(config.badges.len(), 7);
        let super_sharer = config.badges.iter().find(|b| b.id == "super-sharer").unwrap();
        assert_eq!(super_sharer.requirement, 10);
        assert_eq!(super_sharer.badge_type, RewardBadgeType::Shares);
    }

    #[test]
    fn test_missing_badges_fall_back_to_defaults() {
        let config: RewardConfig = serde_json::from_str(
            r#"{"enabled": false, "pointsPerShare": 1, "pointsPerClick": 1, "pointsPerConversion": 1}"#,
        )
        .unwrap();
        assert!(!config.enabled);
        assert_eq!(config.badges, RewardBadge::defaults());
    }
}
