//! Notification preference service.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use myark_core::error::AppError;
use myark_database::repositories::NotificationPreferenceRepository;
use myark_entity::notification::{NotificationPreferences, NotificationPreferencesUpdate};

/// Reads and updates a user's notification preferences.
#[derive(Debug, Clone)]
pub struct NotificationPreferenceService {
    repo: Arc<NotificationPreferenceRepository>,
}

impl NotificationPreferenceService {
    /// Creates a new notification preference service.
    pub fn new(repo: Arc<NotificationPreferenceRepository>) -> Self {
        Self { repo }
    }

    /// Stored preferences, or the defaults when none were saved.
    pub async fn get(&self, user_id: &str) -> Result<NotificationPreferences, AppError> {
        Ok(self
            .repo
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| NotificationPreferences::default_for_user(user_id)))
    }

    /// Merge `update` into the current preferences and store the result.
    pub async fn update(
        &self,
        user_id: &str,
        update: &NotificationPreferencesUpdate,
    ) -> Result<NotificationPreferences, AppError> {
        let mut prefs = self.get(user_id).await?;
        prefs.apply(update);
        prefs.updated_at = Some(Utc::now());
        let saved = self.repo.upsert(&prefs).await?;
        info!(user_id = %user_id, "Notification preferences updated");
        Ok(saved)
    }
}
