//! Actions that earn XP.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use myark_core::config::gamification::XpRewardsConfig;

/// A student activity that awards XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpAction {
    ExploreOpportunity,
    ApplyOpportunity,
    SaveOpportunity,
    UploadCertificate,
    ShareContent,
    HelpOtherStudent,
    ExploreSubject,
    CompleteProfile,
    FirstLogin,
    CommunityPost,
    CommunityComment,
    CommunityUpvote,
}

impl XpAction {
    /// XP granted for this action under the given reward table.
    pub fn xp(&self, rewards: &XpRewardsConfig) -> u64 {
        match self {
            Self::ExploreOpportunity => rewards.explore_opportunity,
            Self::ApplyOpportunity => rewards.apply_opportunity,
            Self::SaveOpportunity => rewards.save_opportunity,
            Self::UploadCertificate => rewards.upload_certificate,
            Self::ShareContent => rewards.share_content,
            Self::HelpOtherStudent => rewards.help_other_student,
            Self::ExploreSubject => rewards.explore_subject,
            Self::CompleteProfile => rewards.complete_profile,
            Self::FirstLogin => rewards.first_login,
            Self::CommunityPost => rewards.community_post,
            Self::CommunityComment => rewards.community_comment,
            Self::CommunityUpvote => rewards.community_upvote,
        }
    }

    /// Return the action as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExploreOpportunity => "explore_opportunity",
            Self::ApplyOpportunity => "apply_opportunity",
            Self::SaveOpportunity => "save_opportunity",
            Self::UploadCertificate => "upload_certificate",
            Self::ShareContent => "share_content",
            Self::HelpOtherStudent => "help_other_student",
            Self::ExploreSubject => "explore_subject",
            Self::CompleteProfile => "complete_profile",
            Self::FirstLogin => "first_login",
            Self::CommunityPost => "community_post",
            Self::CommunityComment => "community_comment",
            Self::CommunityUpvote => "community_upvote",
        }
    }
}

impl fmt::Display for XpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for XpAction {
    type Err = myark_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| myark_core::AppError::validation(format!("Unknown XP action: '{s}'")))
    }
}
