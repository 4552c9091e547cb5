//! Badge requirements and progress.

use serde::Serialize;

use myark_entity::gamification::{BadgeDefinition, BadgeName, UserGamification};
use myark_entity::leaderboard::UserRanks;

use super::subjects::{SubjectCategory, SubjectCounts};

/// Everything badge predicates look at, flattened from a gamification
/// record plus externally derived ranks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    pub opportunities_explored: u32,
    pub opportunities_applied: u32,
    pub certificates_uploaded: u32,
    pub helpful_actions: u32,
    pub achievements: u32,
    pub subjects_explored: u32,
    pub subject_counts: SubjectCounts,
    pub level: u32,
    pub total_badges: u32,
    pub total_xp: u64,
    /// Current daily streak.
    pub current_streak: u32,
    /// Best of the daily and weekly best runs.
    pub best_streak: u32,
    pub profile_completion: u32,
    pub school_rank: Option<u32>,
    pub global_rank: Option<u32>,
    pub streak_broken_and_restarted: bool,
}

/// Ranks known at evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankContext {
    pub global_rank: Option<u32>,
    pub school_rank: Option<u32>,
}

impl From<UserRanks> for RankContext {
    fn from(ranks: UserRanks) -> Self {
        Self {
            global_rank: ranks.global_rank,
            school_rank: ranks.school_rank,
        }
    }
}

impl EvaluationStats {
    /// Flatten a record for evaluation.
    pub fn from_record(record: &UserGamification, ranks: RankContext) -> Self {
        let stats = &record.achievement_stats;
        Self {
            opportunities_explored: stats.opportunities_explored,
            opportunities_applied: stats.opportunities_applied,
            certificates_uploaded: stats.certificates_uploaded,
            helpful_actions: stats.helpful_actions_count,
            achievements: stats.achievements_count,
            subjects_explored: stats.subjects_explored.len() as u32,
            subject_counts: SubjectCounts::from_subjects(&stats.subjects_explored),
            level: u32::try_from(record.level).unwrap_or(1),
            total_badges: record.badge_count() as u32,
            total_xp: record.xp(),
            current_streak: record.streaks.daily.current,
            best_streak: record.streaks.best(),
            profile_completion: u32::try_from(record.profile_completion).unwrap_or(0),
            school_rank: ranks.school_rank,
            global_rank: ranks.global_rank,
            streak_broken_and_restarted: stats.streak_broken_and_restarted,
        }
    }
}

fn rank_within(rank: Option<u32>, limit: u32) -> bool {
    rank.is_some_and(|r| (1..=limit).contains(&r))
}

/// Whether the badge's requirement holds.
///
/// Early-bird, appreciation, popular-share, academic-completion and city
/// rank counters are not tracked, so the badges built on them never qualify.
pub fn requirement_met(badge: BadgeName, stats: &EvaluationStats) -> bool {
    use BadgeName::*;
    let subject = |c| stats.subject_counts.get(c) >= 3;

    match badge {
        FirstStep => stats.profile_completion >= 30,
        ExplorerMode => stats.opportunities_explored >= 5,
        OpportunityHunter => stats.opportunities_applied >= 5,
        StayCurious => stats.subjects_explored >= 5,
        ConsistencyKing | StreakHero => stats.best_streak >= 7,
        MathNinja => subject(SubjectCategory::Math),
        ScienceChamp => subject(SubjectCategory::Science),
        CodeWizard => subject(SubjectCategory::Coding),
        WordWarrior => subject(SubjectCategory::Writing),
        GKGladiator => subject(SubjectCategory::Gk),
        ArtSoul => subject(SubjectCategory::Arts),
        SportsStar => subject(SubjectCategory::Sports),
        BrainiacBadge => stats.subject_counts.categories_with_at_least(2) >= 5,
        TopHelper => stats.helpful_actions >= 5,
        CertificateCollector => stats.certificates_uploaded >= 3,
        AchievementWallBuilder => stats.achievements >= 5,
        ProfilePro => stats.profile_completion >= 90,
        StarPortfolio => stats.profile_completion >= 100,
        StreakMaster => stats.best_streak >= 21,
        StreakLegend => stats.best_streak >= 30,
        NeverGiveUp => stats.streak_broken_and_restarted,
        DailyGrinder => stats.current_streak >= 15,
        AllRounder => stats.total_badges >= 10,
        RisingStar => stats.level >= 10,
        SchoolPride => rank_within(stats.school_rank, 10),
        MyarkChampion => rank_within(stats.global_rank, 100),
        EarlyBird | FriendlyGuide | TrendSpotter | InfluencerBadge | VerifiedScholar
        | CityChampion => false,
    }
}

/// `(current, required)` for badges with a measurable counter.
pub fn progress(badge: BadgeName, stats: &EvaluationStats) -> Option<(u32, u32)> {
    use BadgeName::*;
    match badge {
        ExplorerMode => Some((stats.opportunities_explored, 5)),
        OpportunityHunter => Some((stats.opportunities_applied, 5)),
        EarlyBird => Some((0, 3)),
        StayCurious => Some((stats.subjects_explored, 5)),
        TopHelper => Some((stats.helpful_actions, 5)),
        InfluencerBadge => Some((0, 10)),
        CertificateCollector => Some((stats.certificates_uploaded, 3)),
        AchievementWallBuilder => Some((stats.achievements, 5)),
        AllRounder => Some((stats.total_badges, 10)),
        _ => None,
    }
}

/// Short human-readable requirement.
pub fn criterion(badge: BadgeName) -> &'static str {
    use BadgeName::*;
    match badge {
        FirstStep => "Complete your profile",
        ExplorerMode => "Explore 5 opportunities",
        OpportunityHunter => "Apply to 5 opportunities",
        EarlyBird => "Apply to new opportunities quickly",
        StayCurious => "Explore 5 different subjects",
        ConsistencyKing => "Maintain 7-day streak",
        MathNinja => "3+ math opportunities",
        ScienceChamp => "3+ science opportunities",
        CodeWizard => "3+ coding opportunities",
        WordWarrior => "3+ writing opportunities",
        GKGladiator => "3+ GK opportunities",
        ArtSoul => "3+ arts opportunities",
        SportsStar => "3+ sports opportunities",
        BrainiacBadge => "Master 5+ subjects",
        TopHelper => "Help 5+ students",
        FriendlyGuide => "Get appreciated by 3+ students",
        TrendSpotter => "Share 3 popular opportunities",
        InfluencerBadge => "Share 10+ popular opportunities",
        CertificateCollector => "Upload 3+ certificates",
        AchievementWallBuilder => "Add 5+ achievements",
        VerifiedScholar => "Complete academic profile",
        ProfilePro => "90%+ profile complete",
        StarPortfolio => "100% profile complete",
        StreakHero => "7-day streak",
        StreakMaster => "21-day streak",
        StreakLegend => "30-day streak",
        NeverGiveUp => "Break and restart streak",
        DailyGrinder => "15 consecutive days active",
        AllRounder => "10+ different badges",
        RisingStar => "Reach Level 10",
        SchoolPride => "Top 10 in school",
        CityChampion => "Top 10 in city",
        MyarkChampion => "Top 100 globally",
    }
}

/// Where a student stands on a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeStatus {
    Earned,
    InProgress,
    Locked,
}

/// Progress towards one unearned badge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeProgress {
    pub badge: BadgeDefinition,
    /// 0-100.
    pub progress: u32,
    pub current: u32,
    pub required: u32,
    pub criterion: &'static str,
    pub status: BadgeStatus,
}

impl BadgeProgress {
    /// Compute progress for one badge.
    pub fn compute(badge: BadgeName, stats: &EvaluationStats) -> Self {
        let met = requirement_met(badge, stats);
        let (current, required) = progress(badge, stats).unwrap_or((0, 1));
        let pct = if met {
            100
        } else {
            let ratio = f64::from(current) / f64::from(required.max(1)) * 100.0;
            ratio.round().clamp(0.0, 100.0) as u32
        };
        let status = if met {
            BadgeStatus::Earned
        } else if current > 0 {
            BadgeStatus::InProgress
        } else {
            BadgeStatus::Locked
        };
        Self {
            badge: badge.definition(),
            progress: pct,
            current,
            required,
            criterion: criterion(badge),
            status,
        }
    }
}
