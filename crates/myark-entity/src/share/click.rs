//! Click on a shared link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One visit through a shared link and the actions that followed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShareClick {
    pub id: Uuid,
    pub share_code: String,
    /// Hash of the visitor's address and user agent.
    pub visitor_id: String,
    /// Set once the visitor signs in and converts.
    pub user_id: Option<String>,
    pub clicked_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    pub referrer: Option<String>,
    pub viewed_opportunity: bool,
    pub registered: bool,
    pub bookmarked: bool,
    pub registered_at: Option<DateTime<Utc>>,
    pub bookmarked_at: Option<DateTime<Utc>>,
}
