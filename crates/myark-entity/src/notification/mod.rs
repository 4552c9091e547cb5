//! Notification domain entities.

pub mod preference;

pub use preference::{EmailFrequency, NotificationPreferences, NotificationPreferencesUpdate};
