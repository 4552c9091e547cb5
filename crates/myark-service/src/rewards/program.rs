//! Reward events and reward badge evaluation.

use myark_entity::rewards::{RewardBadge, RewardBadgeType, RewardConfig, RewardDelta, UserRewards};

/// Share activity that earns reward points for the share's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardEvent {
    Share,
    Click,
    Conversion,
}

impl RewardEvent {
    /// The counter and point increment for this event under `config`.
    pub fn delta(self, config: &RewardConfig) -> RewardDelta {
        match self {
            Self::Share => RewardDelta {
                points: config.points_per_share,
                shares: 1,
                ..RewardDelta::default()
            },
            Self::Click => RewardDelta {
                points: config.points_per_click,
                clicks: 1,
                ..RewardDelta::default()
            },
            Self::Conversion => RewardDelta {
                points: config.points_per_conversion,
                conversions: 1,
                ..RewardDelta::default()
            },
        }
    }
}

fn qualifies(badge: &RewardBadge, rewards: &UserRewards) -> bool {
    let counter = |value: i64| u64::try_from(value).is_ok_and(|v| v >= badge.requirement);
    match badge.badge_type {
        RewardBadgeType::Shares => counter(rewards.total_shares),
        RewardBadgeType::Clicks => counter(rewards.total_clicks),
        RewardBadgeType::Conversions => counter(rewards.total_conversions),
        RewardBadgeType::Rank => rewards
            .rank
            .and_then(|r| u64::try_from(r).ok())
            .is_some_and(|r| r >= 1 && r <= badge.requirement),
    }
}

/// Append every newly qualifying badge id once. Returns the new ids.
pub fn evaluate_reward_badges(rewards: &mut UserRewards, badges: &[RewardBadge]) -> Vec<String> {
    let mut earned = Vec::new();
    for badge in badges {
        if !rewards.badges.contains(&badge.id) && qualifies(badge, rewards) {
            rewards.badges.push(badge.id.clone());
            earned.push(badge.id.clone());
        }
    }
    earned
}

/// Reject configs that cannot be evaluated.
pub fn validate_config(config: &RewardConfig) -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for badge in &config.badges {
        if badge.id.trim().is_empty() {
            return Err("Reward badge ids must not be empty".to_string());
        }
        if !seen.insert(badge.id.as_str()) {
            return Err(format!("Duplicate reward badge id '{}'", badge.id));
        }
        if badge.requirement == 0 {
            return Err(format!("Reward badge '{}' needs a requirement of at least 1", badge.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rewards_with_shares(shares: i64) -> UserRewards {
        let mut rewards = UserRewards::empty("u1", Utc::now());
        rewards.total_shares = shares;
        rewards
    }

    #[test]
    fn test_super_sharer_awarded_once() {
        let badges = RewardBadge::defaults();
        let mut rewards = rewards_with_shares(10);

        let earned = evaluate_reward_badges(&mut rewards, &badges);
        assert_eq!(earned, vec!["first-share".to_string(), "super-sharer".to_string()]);

        let again = evaluate_reward_badges(&mut rewards, &badges);
        assert!(again.is_empty());
        assert_eq!(rewards.badges.iter().filter(|b| *b == "super-sharer").count(), 1);
    }

    #[test]
    fn test_rank_badge_needs_known_rank() {
        let badges = RewardBadge::defaults();
        let mut rewards = rewards_with_shares(0);
        assert!(evaluate_reward_badges(&mut rewards, &badges).is_empty());

        rewards.rank = Some(11);
        assert!(evaluate_reward_badges(&mut rewards, &badges).is_empty());

        rewards.rank = Some(10);
        assert_eq!(evaluate_reward_badges(&mut rewards, &badges), vec!["top-performer".to_string()]);
    }

    #[test]
    fn test_event_deltas_follow_config() {
        let config = RewardConfig::default();
        assert_eq!(RewardEvent::Share.delta(&config).points, 10);
        assert_eq!(RewardEvent::Click.delta(&config).clicks, 1);
        assert_eq!(RewardEvent::Conversion.delta(&config).points, 50);
    }

    #[test]
    fn test_validate_config_rejects_duplicates() {
        let mut config = RewardConfig::default();
        assert!(validate_config(&config).is_ok());
        let first = config.badges[0].clone();
        config.badges.push(first);
        assert!(validate_config(&config).is_err());
    }
}
