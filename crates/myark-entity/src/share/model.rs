//! Share record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Channel used to share an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShareMethod {
    Native,
    Clipboard,
    Whatsapp,
    Facebook,
    Twitter,
    Other,
}

/// Device class of the sharer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_platform", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Mobile,
    Desktop,
}

/// What a visitor did after following a shared link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionType {
    Viewed,
    Registered,
    Bookmarked,
}

impl fmt::Display for ConversionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewed => write!(f, "viewed"),
            Self::Registered => write!(f, "registered"),
            Self::Bookmarked => write!(f, "bookmarked"),
        }
    }
}

/// A tracked share of an opportunity link.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    /// Tracking code embedded in the shared link.
    pub share_code: String,
    /// Sharer's user id; `None` for anonymous shares.
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub is_authenticated: bool,
    /// Hashed client address, kept for anonymous shares only.
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub opportunity_id: String,
    pub opportunity_title: String,
    pub opportunity_slug: Option<String>,
    pub share_method: ShareMethod,
    pub platform: SharePlatform,
    pub click_count: i32,
    pub unique_visitors: i32,
    pub conversions_viewed: i32,
    pub conversions_registered: i32,
    pub conversions_bookmarked: i32,
    pub shared_at: DateTime<Utc>,
    pub last_click_at: Option<DateTime<Utc>>,
    pub last_conversion_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl ShareRecord {
    /// Sum of all conversion counters.
    pub fn total_conversions(&self) -> u64 {
        [
            self.conversions_viewed,
            self.conversions_registered,
            self.conversions_bookmarked,
        ]
        .iter()
        .map(|c| u64::try_from(*c).unwrap_or(0))
        .sum()
    }

    /// Click count as an unsigned value.
    pub fn clicks(&self) -> u64 {
        u64::try_from(self.click_count).unwrap_or(0)
    }
}

/// Data required to insert a share record.
#[derive(Debug, Clone)]
pub struct CreateShareRecord {
    pub share_code: String,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub opportunity_id: String,
    pub opportunity_title: String,
    pub opportunity_slug: Option<String>,
    pub share_method: ShareMethod,
    pub platform: SharePlatform,
}
