//! Pure gamification rules: awarding XP, cascading badges, summaries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use myark_core::config::{GamificationConfig, XpRewardsConfig};
use myark_entity::gamification::{BadgeName, EarnedBadge, UserGamification, XpAction};

use super::badges::{BadgeProgress, EvaluationStats, RankContext, requirement_met};
use super::levels::LevelCurve;

/// Snapshot returned by the summary endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationSummary {
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    pub level: u32,
    pub badge_count: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub leaderboard_rank: Option<u32>,
    pub school_rank: Option<u32>,
    #[serde(rename = "nextLevelXP")]
    pub next_level_xp: u64,
    #[serde(rename = "xpToNextLevel")]
    pub xp_to_next_level: u64,
    pub progress_to_next_level: u32,
    pub recent_badges: Vec<EarnedBadge>,
}

/// XP table plus level curve.
#[derive(Debug, Clone)]
pub struct GamificationEngine {
    rewards: XpRewardsConfig,
    curve: LevelCurve,
}

impl GamificationEngine {
    pub fn new(config: &GamificationConfig) -> Self {
        Self {
            rewards: config.xp_rewards.clone(),
            curve: LevelCurve::from(&config.level),
        }
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }

    /// XP granted for an action.
    pub fn xp_for(&self, action: XpAction) -> u64 {
        action.xp(&self.rewards)
    }

    /// Add XP, then award every badge that became satisfied.
    ///
    /// Each new badge carries a bonus which can unlock further badges
    /// (AllRounder, RisingStar), so evaluation repeats until nothing new
    /// is earned. Returns the badges earned by this call.
    pub fn award_xp(
        &self,
        record: &mut UserGamification,
        amount: u64,
        ranks: RankContext,
        now: DateTime<Utc>,
    ) -> Vec<EarnedBadge> {
        self.add_xp(record, amount);
        record.last_xp_update = Some(now);
        self.evaluate_badges(record, ranks, now)
    }

    /// Award any badges whose requirement now holds, with their bonus XP.
    pub fn evaluate_badges(
        &self,
        record: &mut UserGamification,
        ranks: RankContext,
        now: DateTime<Utc>,
    ) -> Vec<EarnedBadge> {
        let mut earned = Vec::new();
        loop {
            let stats = EvaluationStats::from_record(record, ranks);
            let fresh: Vec<BadgeName> = BadgeName::ALL
                .into_iter()
                .filter(|b| !record.has_badge(*b) && requirement_met(*b, &stats))
                .collect();
            if fresh.is_empty() {
                break;
            }
            for badge in fresh {
                let badge = EarnedBadge::new(badge, now);
                record.badges.push(badge.clone());
                self.add_xp(record, self.rewards.badge_earned);
                earned.push(badge);
            }
        }
        if !earned.is_empty() {
            record.last_xp_update = Some(now);
        }
        earned
    }

    /// Bump the achievement counters an action feeds.
    pub fn apply_action(&self, record: &mut UserGamification, action: XpAction, subject: Option<&str>) {
        let stats = &mut record.achievement_stats;
        match action {
            XpAction::ExploreOpportunity => {
                stats.opportunities_explored = stats.opportunities_explored.saturating_add(1);
                if let Some(subject) = subject {
                    stats.add_subject(subject);
                }
            }
            XpAction::ExploreSubject => {
                if let Some(subject) = subject {
                    stats.add_subject(subject);
                }
            }
            XpAction::ApplyOpportunity => {
                stats.opportunities_applied = stats.opportunities_applied.saturating_add(1);
            }
            XpAction::SaveOpportunity => {
                stats.opportunities_saved = stats.opportunities_saved.saturating_add(1);
            }
            XpAction::UploadCertificate => {
                stats.certificates_uploaded = stats.certificates_uploaded.saturating_add(1);
            }
            XpAction::ShareContent => {
                stats.posts_shared = stats.posts_shared.saturating_add(1);
            }
            XpAction::HelpOtherStudent => {
                stats.helpful_actions_count = stats.helpful_actions_count.saturating_add(1);
            }
            XpAction::CompleteProfile
            | XpAction::FirstLogin
            | XpAction::CommunityPost
            | XpAction::CommunityComment
            | XpAction::CommunityUpvote => {}
        }
    }

    /// Progress on every badge not yet held, closest first.
    pub fn badge_progress(&self, record: &UserGamification, ranks: RankContext) -> Vec<BadgeProgress> {
        let stats = EvaluationStats::from_record(record, ranks);
        let mut progress: Vec<BadgeProgress> = BadgeName::ALL
            .into_iter()
            .filter(|b| !record.has_badge(*b))
            .map(|b| BadgeProgress::compute(b, &stats))
            .collect();
        progress.sort_by(|a, b| b.progress.cmp(&a.progress));
        progress
    }

    pub fn summary(&self, record: &UserGamification, ranks: RankContext) -> GamificationSummary {
        let xp = record.xp();
        let level = self.curve.level_for(xp);
        let next_level = (level + 1).min(self.curve.max_level());
        GamificationSummary {
            total_xp: xp,
            level,
            badge_count: record.badge_count() as u32,
            current_streak: record.streaks.daily.current,
            best_streak: record.streaks.best(),
            leaderboard_rank: ranks.global_rank,
            school_rank: ranks.school_rank,
            next_level_xp: self.curve.threshold(next_level),
            xp_to_next_level: self.curve.xp_to_next_level(xp),
            progress_to_next_level: self.curve.progress_to_next_level(xp),
            recent_badges: record.recent_badges(3),
        }
    }

    fn add_xp(&self, record: &mut UserGamification, amount: u64) {
        let amount = i64::try_from(amount).unwrap_or(i64::MAX);
        record.total_xp = record.total_xp.saturating_add(amount);
        let level = self.curve.level_for(record.xp());
        record.level = i32::try_from(level).unwrap_or(i32::MAX);
    }
}

impl Default for GamificationEngine {
    fn default() -> Self {
        Self::new(&GamificationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_award_recomputes_level() {
        let engine = GamificationEngine::default();
        let mut record = UserGamification::new("u1", None, now());
        let badges = engine.award_xp(&mut record, 120, RankContext::default(), now());
        assert!(badges.is_empty());
        assert_eq!(record.total_xp, 120);
        assert_eq!(record.level, 2);
    }

    #[test]
    fn test_level_never_drops_across_awards() {
        let engine = GamificationEngine::default();
        let mut record = UserGamification::new("u1", None, now());
        let mut previous = record.level;
        for amount in [0, 5, 10, 100, 1, 250, 0, 999] {
            engine.award_xp(&mut record, amount, RankContext::default(), now());
            assert!(record.level >= previous);
            previous = record.level;
        }
    }

    #[test]
    fn test_badge_bonus_is_added_once() {
        let engine = GamificationEngine::default();
        let mut record = UserGamification::new("u1", None, now());
        record.achievement_stats.opportunities_explored = 5;

        let badges = engine.award_xp(&mut record, 10, RankContext::default(), now());
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].id, BadgeName::ExplorerMode);
        assert_eq!(record.total_xp, 35);

        let again = engine.award_xp(&mut record, 10, RankContext::default(), now());
        assert!(again.is_empty());
        assert_eq!(record.total_xp, 45);
        assert_eq!(record.badge_count(), 1);
    }

    #[test]
    fn test_all_rounder_cascades() {
        let engine = GamificationEngine::default();
        let mut record = UserGamification::new("u1", None, now());
        let stats = &mut record.achievement_stats;
        stats.opportunities_explored = 5;
        stats.opportunities_applied = 5;
        stats.helpful_actions_count = 5;
        stats.certificates_uploaded = 3;
        stats.achievements_count = 5;
        stats.streak_broken_and_restarted = true;
        record.profile_completion = 100;
        record.streaks.daily.best = 7;

        // FirstStep, ProfilePro, StarPortfolio, ExplorerMode, OpportunityHunter,
        // TopHelper, CertificateCollector, AchievementWallBuilder, NeverGiveUp,
        // ConsistencyKing, StreakHero: 11 badges, which unlocks AllRounder.
        let badges = engine.award_xp(&mut record, 0, RankContext::default(), now());
        let ids: Vec<BadgeName> = badges.iter().map(|b| b.id).collect();
        assert!(ids.contains(&BadgeName::AllRounder));
        assert_eq!(badges.len(), 12);
        assert_eq!(record.total_xp, 12 * 25);
        assert_eq!(record.level, 3);
    }

    #[test]
    fn test_rank_badges_need_ranks() {
        let engine = GamificationEngine::default();
        let mut record = UserGamification::new("u1", Some("s1".into()), now());
        assert!(engine.evaluate_badges(&mut record, RankContext::default(), now()).is_empty());

        let ranks = RankContext {
            global_rank: Some(42),
            school_rank: Some(3),
        };
        let badges = engine.evaluate_badges(&mut record, ranks, now());
        let ids: Vec<BadgeName> = badges.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BadgeName::SchoolPride, BadgeName::MyarkChampion]);
    }

    #[test]
    fn test_apply_action_counters() {
        let engine = GamificationEngine::default();
        let mut record = UserGamification::new("u1", None, now());
        engine.apply_action(&mut record, XpAction::ExploreOpportunity, Some("Physics"));
        engine.apply_action(&mut record, XpAction::ExploreSubject, Some("Algebra"));
        engine.apply_action(&mut record, XpAction::CommunityPost, None);
        let stats = &record.achievement_stats;
        assert_eq!(stats.opportunities_explored, 1);
        assert_eq!(stats.subjects_explored.len(), 2);
        assert_eq!(engine.xp_for(XpAction::CommunityPost), 25);
    }

    #[test]
    fn test_summary_and_progress() {
        let engine = GamificationEngine::default();
        let mut record = UserGamification::new("u1", None, now());
        record.total_xp = 175;
        record.achievement_stats.opportunities_explored = 4;
        let summary = engine.summary(
            &record,
            RankContext {
                global_rank: Some(7),
                school_rank: None,
            },
        );
        assert_eq!(summary.level, 2);
        assert_eq!(summary.next_level_xp, 250);
        assert_eq!(summary.xp_to_next_level, 75);
        assert_eq!(summary.progress_to_next_level, 50);
        assert_eq!(summary.leaderboard_rank, Some(7));

        let progress = engine.badge_progress(&record, RankContext::default());
        assert_eq!(progress.len(), BadgeName::ALL.len());
        assert_eq!(progress[0].badge.id, "ExplorerMode");
        assert_eq!(progress[0].progress, 80);
    }
}
