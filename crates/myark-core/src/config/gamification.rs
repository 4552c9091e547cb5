//! Gamification tuning: XP rewards, level curve, leaderboard sizes, and
//! quiz leaderboard defaults.

use serde::{Deserialize, Serialize};

/// Gamification configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamificationConfig {
    /// XP awarded per action.
    #[serde(default)]
    pub xp_rewards: XpRewardsConfig,
    /// Level curve parameters.
    #[serde(default)]
    pub level: LevelConfig,
    /// Leaderboard page sizes.
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    /// Quiz leaderboard settings.
    #[serde(default)]
    pub quiz: QuizConfig,
}

/// XP amounts per action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpRewardsConfig {
    #[serde(default = "default_explore_opportunity")]
    pub explore_opportunity: u64,
    #[serde(default = "default_apply_opportunity")]
    pub apply_opportunity: u64,
    #[serde(default = "default_save_opportunity")]
    pub save_opportunity: u64,
    #[serde(default = "default_upload_certificate")]
    pub upload_certificate: u64,
    #[serde(default = "default_share_content")]
    pub share_content: u64,
    #[serde(default = "default_help_other_student")]
    pub help_other_student: u64,
    #[serde(default = "default_explore_subject")]
    pub explore_subject: u64,
    #[serde(default = "default_complete_profile")]
    pub complete_profile: u64,
    #[serde(default = "default_first_login")]
    pub first_login: u64,
    #[serde(default = "default_community_post")]
    pub community_post: u64,
    #[serde(default = "default_community_comment")]
    pub community_comment: u64,
    #[serde(default = "default_community_upvote")]
    pub community_upvote: u64,
    /// Bonus granted for every newly earned badge.
    #[serde(default = "default_badge_earned")]
    pub badge_earned: u64,
}

impl Default for XpRewardsConfig {
    fn default() -> Self {
        Self {
            explore_opportunity: default_explore_opportunity(),
            apply_opportunity: default_apply_opportunity(),
            save_opportunity: default_save_opportunity(),
            upload_certificate: default_upload_certificate(),
            share_content: default_share_content(),
            help_other_student: default_help_other_student(),
            explore_subject: default_explore_subject(),
            complete_profile: default_complete_profile(),
            first_login: default_first_login(),
            community_post: default_community_post(),
            community_comment: default_community_comment(),
            community_upvote: default_community_upvote(),
            badge_earned: default_badge_earned(),
        }
    }
}

/// Level curve: level `L` requires the sum of `base_xp + (i - 1) * increment`
/// for `i` in `1..L`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default = "default_base_xp")]
    pub base_xp: u64,
    #[serde(default = "default_increment")]
    pub increment: u64,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            base_xp: default_base_xp(),
            increment: default_increment(),
            max_level: default_max_level(),
        }
    }
}

/// Leaderboard sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Default number of entries on the global board.
    #[serde(default = "default_global_top_n")]
    pub global_top_n: u32,
    /// Default number of entries on a school board.
    #[serde(default = "default_school_top_n")]
    pub school_top_n: u32,
    /// Upper bound for any caller-supplied limit.
    #[serde(default = "default_max_top_n")]
    pub max_top_n: u32,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            global_top_n: default_global_top_n(),
            school_top_n: default_school_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

/// Quiz settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Hours after the quiz end date before a delayed leaderboard opens,
    /// when the quiz does not specify its own delay.
    #[serde(default = "default_delay_hours")]
    pub default_delay_hours: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_delay_hours: default_delay_hours(),
        }
    }
}

fn default_explore_opportunity() -> u64 {
    10
}

fn default_apply_opportunity() -> u64 {
    25
}

fn default_save_opportunity() -> u64 {
    15
}

fn default_upload_certificate() -> u64 {
    50
}

fn default_share_content() -> u64 {
    20
}

fn default_help_other_student() -> u64 {
    30
}

fn default_explore_subject() -> u64 {
    5
}

fn default_complete_profile() -> u64 {
    100
}

fn default_first_login() -> u64 {
    20
}

fn default_community_post() -> u64 {
    25
}

fn default_community_comment() -> u64 {
    10
}

fn default_community_upvote() -> u64 {
    5
}

fn default_badge_earned() -> u64 {
    25
}

fn default_base_xp() -> u64 {
    100
}

fn default_increment() -> u64 {
    50
}

fn default_max_level() -> u32 {
    50
}

fn default_global_top_n() -> u32 {
    100
}

fn default_school_top_n() -> u32 {
    50
}

fn default_max_top_n() -> u32 {
    500
}

fn default_delay_hours() -> u32 {
    24
}
