//! Notification preference repository.

use sqlx::PgPool;

use myark_core::error::{AppError, ErrorKind};
use myark_core::result::AppResult;
use myark_entity::notification::NotificationPreferences;

/// Repository for per-user notification preferences.
#[derive(Debug, Clone)]
pub struct NotificationPreferenceRepository {
    pool: PgPool,
}

impl NotificationPreferenceRepository {
    /// Create a new notification preference repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stored preferences for a user.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Option<NotificationPreferences>> {
        sqlx::query_as::<_, NotificationPreferences>(
            "SELECT * FROM notification_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load notification preferences", e)
        })
    }

    /// Insert or replace a user's preferences.
    pub async fn upsert(&self, prefs: &NotificationPreferences) -> AppResult<NotificationPreferences> {
        sqlx::query_as::<_, NotificationPreferences>(
            "INSERT INTO notification_preferences (user_id, new_opportunities, deadline_reminders, \
             weekly_digest, school_activity, application_updates, push_enabled, email_enabled, \
             email_frequency, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (user_id) DO UPDATE SET \
             new_opportunities = EXCLUDED.new_opportunities, \
             deadline_reminders = EXCLUDED.deadline_reminders, \
             weekly_digest = EXCLUDED.weekly_digest, \
             school_activity = EXCLUDED.school_activity, \
             application_updates = EXCLUDED.application_updates, \
             push_enabled = EXCLUDED.push_enabled, \
             email_enabled = EXCLUDED.email_enabled, \
             email_frequency = EXCLUDED.email_frequency, \
             updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(&prefs.user_id)
        .bind(prefs.new_opportunities)
        .bind(prefs.deadline_reminders)
        .bind(prefs.weekly_digest)
        .bind(prefs.school_activity)
        .bind(prefs.application_updates)
        .bind(prefs.push_enabled)
        .bind(prefs.email_enabled)
        .bind(prefs.email_frequency)
        .bind(prefs.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to save notification preferences", e)
        })
    }
}
