//! Badge identifiers, categories, rarities, and the static badge catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every badge a student can earn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BadgeName {
    FirstStep,
    ExplorerMode,
    OpportunityHunter,
    EarlyBird,
    StayCurious,
    ConsistencyKing,
    MathNinja,
    ScienceChamp,
    CodeWizard,
    WordWarrior,
    GKGladiator,
    ArtSoul,
    SportsStar,
    BrainiacBadge,
    TopHelper,
    FriendlyGuide,
    TrendSpotter,
    InfluencerBadge,
    CertificateCollector,
    AchievementWallBuilder,
    VerifiedScholar,
    ProfilePro,
    StarPortfolio,
    StreakHero,
    StreakMaster,
    StreakLegend,
    NeverGiveUp,
    DailyGrinder,
    AllRounder,
    RisingStar,
    SchoolPride,
    CityChampion,
    MyarkChampion,
}

impl BadgeName {
    /// All badges in catalogue order.
    pub const ALL: [BadgeName; 33] = [
        Self::FirstStep,
        Self::ExplorerMode,
        Self::OpportunityHunter,
        Self::EarlyBird,
        Self::StayCurious,
        Self::ConsistencyKing,
        Self::MathNinja,
        Self::ScienceChamp,
        Self::CodeWizard,
        Self::WordWarrior,
        Self::GKGladiator,
        Self::ArtSoul,
        Self::SportsStar,
        Self::BrainiacBadge,
        Self::TopHelper,
        Self::FriendlyGuide,
        Self::TrendSpotter,
        Self::InfluencerBadge,
        Self::CertificateCollector,
        Self::AchievementWallBuilder,
        Self::VerifiedScholar,
        Self::ProfilePro,
        Self::StarPortfolio,
        Self::StreakHero,
        Self::StreakMaster,
        Self::StreakLegend,
        Self::NeverGiveUp,
        Self::DailyGrinder,
        Self::AllRounder,
        Self::RisingStar,
        Self::SchoolPride,
        Self::CityChampion,
        Self::MyarkChampion,
    ];

    /// Identifier as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        self.definition().id
    }

    /// Static display metadata for this badge.
    pub fn definition(&self) -> BadgeDefinition {
        use BadgeCategory as C;
        use BadgeRarity as R;

        let def = |id, name, display_name, description, category, icon, rarity| BadgeDefinition {
            id,
            name,
            display_name,
            description,
            category,
            icon,
            rarity,
            school_specific: false,
            global_only: false,
        };

        match self {
            Self::FirstStep => def(
                "FirstStep",
                "First Step Badge",
                "First Step",
                "Complete your profile to take your first step.",
                C::FirstSteps,
                "🚀",
                R::Common,
            ),
            Self::ExplorerMode => def(
                "ExplorerMode",
                "Explorer Mode ON",
                "Explorer",
                "Explore 5 different opportunities across various categories.",
                C::Exploration,
                "🗺️",
                R::Common,
            ),
            Self::OpportunityHunter => def(
                "OpportunityHunter",
                "Opportunity Hunter",
                "Opportunity Hunter",
                "Apply to 5 opportunities to earn this achievement.",
                C::Exploration,
                "🎯",
                R::Uncommon,
            ),
            Self::EarlyBird => def(
                "EarlyBird",
                "Early Bird",
                "Early Bird",
                "Be among the first to discover and apply for new opportunities.",
                C::Exploration,
                "🌅",
                R::Uncommon,
            ),
            Self::StayCurious => def(
                "StayCurious",
                "Stay Curious",
                "Stay Curious",
                "Explore opportunities in 5 different subject areas.",
                C::Exploration,
                "🧠",
                R::Uncommon,
            ),
            Self::ConsistencyKing => def(
                "ConsistencyKing",
                "Consistency King/Queen",
                "Consistency",
                "Maintain a 7-day streak of platform activity.",
                C::Consistency,
                "👑",
                R::Rare,
            ),
            Self::MathNinja => def(
                "MathNinja",
                "Math Ninja",
                "Math Ninja",
                "Explore and apply for 3+ math-related opportunities.",
                C::SubjectMastery,
                "🥷",
                R::Uncommon,
            ),
            Self::ScienceChamp => def(
                "ScienceChamp",
                "Science Champ",
                "Science Champ",
                "Explore and apply for 3+ science-related opportunities.",
                C::SubjectMastery,
                "🔬",
                R::Uncommon,
            ),
            Self::CodeWizard => def(
                "CodeWizard",
                "Code Wizard",
                "Code Wizard",
                "Explore and apply for 3+ coding/programming opportunities.",
                C::SubjectMastery,
                "🧙",
                R::Uncommon,
            ),
            Self::WordWarrior => def(
                "WordWarrior",
                "Word Warrior",
                "Word Warrior",
                "Explore and apply for 3+ writing/literature opportunities.",
                C::SubjectMastery,
                "✍️",
                R::Uncommon,
            ),
            Self::GKGladiator => def(
                "GKGladiator",
                "GK Gladiator",
                "GK Gladiator",
                "Explore and apply for 3+ general knowledge opportunities.",
                C::SubjectMastery,
                "⚔️",
                R::Uncommon,
            ),
            Self::ArtSoul => def(
                "ArtSoul",
                "Art & Soul",
                "Art & Soul",
                "Explore and apply for 3+ arts/creative opportunities.",
                C::SubjectMastery,
                "🎨",
                R::Uncommon,
            ),
            Self::SportsStar => def(
                "SportsStar",
                "Sports Star",
                "Sports Star",
                "Explore and apply for 3+ sports opportunities.",
                C::SubjectMastery,
                "⚽",
                R::Uncommon,
            ),
            Self::BrainiacBadge => def(
                "BrainiacBadge",
                "Brainiac Badge",
                "Brainiac",
                "Master 5+ different subject categories.",
                C::SubjectMastery,
                "🧩",
                R::Rare,
            ),
            Self::TopHelper => def(
                "TopHelper",
                "Top Helper",
                "Top Helper",
                "Help 5+ other students through community interactions.",
                C::Social,
                "🤝",
                R::Uncommon,
            ),
            Self::FriendlyGuide => def(
                "FriendlyGuide",
                "Friendly Guide",
                "Friendly Guide",
                "Receive appreciation from 3+ different students.",
                C::Social,
                "👋",
                R::Uncommon,
            ),
            Self::TrendSpotter => def(
                "TrendSpotter",
                "Trend Spotter",
                "Trend Spotter",
                "Share 3 popular opportunities that get high engagement.",
                C::Social,
                "📈",
                R::Rare,
            ),
            Self::InfluencerBadge => def(
                "InfluencerBadge",
                "Influencer Badge",
                "Influencer",
                "Share 10+ opportunities with high community engagement.",
                C::Social,
                "⭐",
                R::Epic,
            ),
            Self::CertificateCollector => def(
                "CertificateCollector",
                "Certificate Collector",
                "Certificate Collector",
                "Upload 3+ certificates to your profile.",
                C::Achievement,
                "📜",
                R::Uncommon,
            ),
            Self::AchievementWallBuilder => def(
                "AchievementWallBuilder",
                "Achievement Wall Builder",
                "Achievement Builder",
                "Add 5+ achievements to your portfolio.",
                C::Achievement,
                "🏆",
                R::Uncommon,
            ),
            Self::VerifiedScholar => def(
                "VerifiedScholar",
                "Verified Scholar",
                "Verified Scholar",
                "Complete all academic sections of your profile.",
                C::Achievement,
                "✅",
                R::Rare,
            ),
            Self::ProfilePro => def(
                "ProfilePro",
                "Profile Pro",
                "Profile Pro",
                "Complete 90%+ of your profile information.",
                C::Portfolio,
                "💎",
                R::Epic,
            ),
            Self::StarPortfolio => def(
                "StarPortfolio",
                "Star Portfolio",
                "Star Portfolio",
                "Achieve a 100% complete profile with all sections filled.",
                C::Portfolio,
                "⭐",
                R::Epic,
            ),
            Self::StreakHero => def(
                "StreakHero",
                "Streak Hero",
                "Streak Hero",
                "Maintain a 7-day activity streak.",
                C::Consistency,
                "🔥",
                R::Uncommon,
            ),
            Self::StreakMaster => def(
                "StreakMaster",
                "Streak Master",
                "Streak Master",
                "Maintain a 21-day activity streak.",
                C::Consistency,
                "🔥",
                R::Rare,
            ),
            Self::StreakLegend => def(
                "StreakLegend",
                "Streak Legend",
                "Streak Legend",
                "Maintain a 30-day activity streak.",
                C::Consistency,
                "🔥",
                R::Epic,
            ),
            Self::NeverGiveUp => def(
                "NeverGiveUp",
                "Never Give Up Badge",
                "Never Give Up",
                "Break a streak and restart.",
                C::Consistency,
                "💪",
                R::Rare,
            ),
            Self::DailyGrinder => def(
                "DailyGrinder",
                "Daily Grinder",
                "Daily Grinder",
                "Log in and perform actions for 15 consecutive days.",
                C::Consistency,
                "⏰",
                R::Uncommon,
            ),
            Self::AllRounder => def(
                "AllRounder",
                "All-Rounder Badge",
                "All-Rounder",
                "Earn 10+ different badges.",
                C::Achievement,
                "🎯",
                R::Epic,
            ),
            Self::RisingStar => def(
                "RisingStar",
                "Rising Star",
                "Rising Star",
                "Reach Level 10.",
                C::Leaderboard,
                "⭐",
                R::Rare,
            ),
            Self::SchoolPride => BadgeDefinition {
                school_specific: true,
                ..def(
                    "SchoolPride",
                    "School Pride Badge",
                    "School Pride",
                    "Rank in top 10 of your school leaderboard.",
                    C::Leaderboard,
                    "🏫",
                    R::Rare,
                )
            },
            Self::CityChampion => BadgeDefinition {
                global_only: true,
                ..def(
                    "CityChampion",
                    "City Champion",
                    "City Champion",
                    "Rank in top 10 across all schools in your city.",
                    C::Leaderboard,
                    "🏅",
                    R::Epic,
                )
            },
            Self::MyarkChampion => BadgeDefinition {
                global_only: true,
                ..def(
                    "MyarkChampion",
                    "Myark Champion",
                    "Myark Champion",
                    "Rank in top 100 globally on the Myark platform.",
                    C::Leaderboard,
                    "👑",
                    R::Legendary,
                )
            },
        }
    }
}

impl fmt::Display for BadgeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeName {
    type Err = myark_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| myark_core::AppError::validation(format!("Unknown badge: '{s}'")))
    }
}

/// Grouping used by the badge gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    FirstSteps,
    Exploration,
    SubjectMastery,
    Social,
    Achievement,
    Consistency,
    Community,
    Portfolio,
    Leaderboard,
}

/// How hard a badge is to earn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Static catalogue entry for a badge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: BadgeCategory,
    pub icon: &'static str,
    pub rarity: BadgeRarity,
    pub school_specific: bool,
    pub global_only: bool,
}

/// A badge held by a student. Stored inside the `badges` JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedBadge {
    /// Badge identifier; unique within a student's badge list.
    pub id: BadgeName,
    pub category: BadgeCategory,
    pub rarity: BadgeRarity,
    /// When the badge was earned.
    pub earned_at: DateTime<Utc>,
}

impl EarnedBadge {
    /// Create an earned badge stamped at `at`.
    pub fn new(id: BadgeName, at: DateTime<Utc>) -> Self {
        let def = id.definition();
        Self {
            id,
            category: def.category,
            rarity: def.rarity,
            earned_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_ids_match_variants() {
        for badge in BadgeName::ALL {
            let json = serde_json::to_value(badge).unwrap();
            assert_eq!(json, serde_json::Value::String(badge.as_str().to_string()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("StreakHero".parse::<BadgeName>().unwrap(), BadgeName::StreakHero);
        assert_eq!("gkgladiator".parse::<BadgeName>().unwrap(), BadgeName::GKGladiator);
        assert!("Nope".parse::<BadgeName>().is_err());
    }

    #[test]
    fn test_leaderboard_flags() {
        assert!(BadgeName::SchoolPride.definition().school_specific);
        assert!(BadgeName::MyarkChampion.definition().global_only);
        assert_eq!(
            BadgeName::MyarkChampion.definition().rarity,
            BadgeRarity::Legendary
        );
    }
}
