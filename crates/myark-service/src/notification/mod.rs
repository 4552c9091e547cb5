//! Notification delivery preferences.

pub mod service;

pub use service::NotificationPreferenceService;
