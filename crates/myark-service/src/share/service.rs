//! Share recording, click and conversion tracking, and analytics.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use myark_core::error::AppError;
use myark_database::repositories::{ShareFilter, ShareRepository};
use myark_entity::share::{
    ConversionType, CreateShareRecord, ShareClick, ShareMethod, SharePlatform, ShareRecord,
};

use super::analytics::{ShareAnalytics, aggregate};
use super::code::generate_share_code;
use super::hashing::{hash_value, visitor_id};
use crate::context::{ClientInfo, RequestContext};
use crate::rewards::{RewardEvent, RewardsService};

/// A share about to be recorded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShare {
    pub opportunity_id: String,
    pub opportunity_title: String,
    #[serde(default)]
    pub opportunity_slug: Option<String>,
    pub share_method: ShareMethod,
    pub platform: SharePlatform,
}

/// Tracks shares and credits their owners through the rewards program.
#[derive(Debug, Clone)]
pub struct ShareService {
    repo: Arc<ShareRepository>,
    rewards: Arc<RewardsService>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(repo: Arc<ShareRepository>, rewards: Arc<RewardsService>) -> Self {
        Self { repo, rewards }
    }

    /// Record a share. Signed-in sharers earn share rewards; anonymous
    /// shares keep the hashed client address instead.
    pub async fn record_share(
        &self,
        sharer: Option<&RequestContext>,
        share: NewShare,
        client: &ClientInfo,
    ) -> Result<ShareRecord, AppError> {
        let opportunity_id = share.opportunity_id.trim();
        let opportunity_title = share.opportunity_title.trim();
        if opportunity_id.is_empty() || opportunity_title.is_empty() {
            return Err(AppError::validation(
                "opportunityId and opportunityTitle are required",
            ));
        }

        let now = Utc::now();
        let user_id = sharer.map(|ctx| ctx.user_id.clone());
        let data = CreateShareRecord {
            share_code: generate_share_code(user_id.as_deref(), now),
            user_email: sharer.and_then(|ctx| ctx.email.clone()),
            user_name: sharer.and_then(|ctx| ctx.name.clone()),
            ip_address: sharer
                .is_none()
                .then(|| hash_value(&client.ip_address)),
            user_agent: sharer.is_none().then(|| client.user_agent.clone()),
            user_id,
            opportunity_id: opportunity_id.to_string(),
            opportunity_title: opportunity_title.to_string(),
            opportunity_slug: share.opportunity_slug.filter(|s| !s.trim().is_empty()),
            share_method: share.share_method,
            platform: share.platform,
        };
        let record = self.repo.create(&data, now).await?;

        info!(
            share_code = %record.share_code,
            opportunity_id = %record.opportunity_id,
            authenticated = record.is_authenticated,
            "Share recorded"
        );

        if let Some(owner) = record.user_id.as_deref() {
            self.reward(owner, RewardEvent::Share).await;
        }
        Ok(record)
    }

    /// Record a click through a shared link. Clicks on unknown codes are
    /// stored too; `None` is returned for them.
    pub async fn record_click(
        &self,
        share_code: &str,
        client: &ClientInfo,
    ) -> Result<Option<ShareRecord>, AppError> {
        let share_code = require_code(share_code)?;
        let click = ShareClick {
            id: Uuid::now_v7(),
            share_code: share_code.to_string(),
            visitor_id: visitor_id(&client.ip_address, &client.user_agent),
            user_id: None,
            clicked_at: Utc::now(),
            ip_address: hash_value(&client.ip_address),
            user_agent: client.user_agent.clone(),
            referrer: client.referrer.clone(),
            viewed_opportunity: true,
            registered: false,
            bookmarked: false,
            registered_at: None,
            bookmarked_at: None,
        };

        let share = self.repo.record_click(&click).await?;
        match share.as_ref() {
            Some(share) => {
                debug!(share_code = %share_code, clicks = share.click_count, "Share click recorded");
                if let Some(owner) = share.user_id.as_deref() {
                    self.reward(owner, RewardEvent::Click).await;
                }
            }
            None => debug!(share_code = %share_code, "Click recorded for unknown share"),
        }
        Ok(share)
    }

    /// Record what a visitor did after following a shared link.
    pub async fn record_conversion(
        &self,
        share_code: &str,
        conversion: ConversionType,
        user_id: Option<&str>,
        client: &ClientInfo,
    ) -> Result<Option<ShareRecord>, AppError> {
        let share_code = require_code(share_code)?;
        let visitor = visitor_id(&client.ip_address, &client.user_agent);
        let share = self
            .repo
            .record_conversion(share_code, &visitor, conversion, user_id, Utc::now())
            .await?;

        if let Some(share) = share.as_ref() {
            info!(share_code = %share_code, conversion = %conversion, "Share conversion recorded");
            if let Some(owner) = share.user_id.as_deref() {
                self.reward(owner, RewardEvent::Conversion).await;
            }
        }
        Ok(share)
    }

    /// Admin analytics over the shares matching `filter`.
    pub async fn analytics(&self, filter: &ShareFilter) -> Result<ShareAnalytics, AppError> {
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            if end < start {
                return Err(AppError::validation("endDate must not precede startDate"));
            }
        }
        let shares = self.repo.list(filter).await?;
        Ok(aggregate(shares))
    }

    async fn reward(&self, owner: &str, event: RewardEvent) {
        if let Err(e) = self.rewards.record_event(owner, event).await {
            warn!(user_id = %owner, event = ?event, error = %e, "Failed to update share rewards");
        }
    }
}

fn require_code(share_code: &str) -> Result<&str, AppError> {
    let code = share_code.trim();
    if code.is_empty() {
        return Err(AppError::validation("shareCode is required"));
    }
    Ok(code)
}
