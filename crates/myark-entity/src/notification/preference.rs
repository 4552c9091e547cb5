//! Notification preference entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How often email notifications are batched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "email_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EmailFrequency {
    Instant,
    Daily,
    #[default]
    Weekly,
}

/// Per-user notification delivery preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    /// The user these preferences belong to.
    #[serde(skip_serializing)]
    pub user_id: String,
    pub new_opportunities: bool,
    pub deadline_reminders: bool,
    pub weekly_digest: bool,
    pub school_activity: bool,
    pub application_updates: bool,
    pub push_enabled: bool,
    pub email_enabled: bool,
    pub email_frequency: EmailFrequency,
    /// When preferences were last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl NotificationPreferences {
    /// Default preferences: everything on except push, weekly email.
    pub fn default_for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            new_opportunities: true,
            deadline_reminders: true,
            weekly_digest: true,
            school_activity: true,
            application_updates: true,
            push_enabled: false,
            email_enabled: true,
            email_frequency: EmailFrequency::Weekly,
            updated_at: None,
        }
    }

    /// Merge a partial update; absent fields keep their current value.
    pub fn apply(&mut self, update: &NotificationPreferencesUpdate) {
        macro_rules! merge {
            ($($field:ident),*) => {
                $(if let Some(v) = update.$field {
                    self.$field = v;
                })*
            };
        }
        merge!(
            new_opportunities,
            deadline_reminders,
            weekly_digest,
            school_activity,
            application_updates,
            push_enabled,
            email_enabled,
            email_frequency
        );
    }
}

/// Partial preference update. Unknown fields in the request body are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferencesUpdate {
    pub new_opportunities: Option<bool>,
    pub deadline_reminders: Option<bool>,
    pub weekly_digest: Option<bool>,
    pub school_activity: Option<bool>,
    pub application_updates: Option<bool>,
    pub push_enabled: Option<bool>,
    pub email_enabled: Option<bool>,
    pub email_frequency: Option<EmailFrequency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = NotificationPreferences::default_for_user("u1");
        assert!(prefs.new_opportunities);
        assert!(prefs.weekly_digest);
        assert!(!prefs.push_enabled);
        assert!(prefs.email_enabled);
        assert_eq!(prefs.email_frequency, EmailFrequency::Weekly);
    }

    #[test]
    fn test_partial_update_ignores_unknown_fields() {
        let update: NotificationPreferencesUpdate = serde_json::from_str(
            r#"{"pushEnabled": true, "emailFrequency": "daily", "bogus": 1}"#,
        )
        .unwrap();
        let mut prefs = NotificationPreferences::default_for_user("u1");
        prefs.apply(&update);
        assert!(prefs.push_enabled);
        assert_eq!(prefs.email_frequency, EmailFrequency::Daily);
        assert!(prefs.deadline_reminders);
    }
}
