//! Repository implementations for all Myark entities.

pub mod gamification;
pub mod notification;
pub mod profile;
pub mod quiz;
pub mod rewards;
pub mod share;

pub use gamification::GamificationRepository;
pub use notification::NotificationPreferenceRepository;
pub use profile::ProfileRepository;
pub use quiz::QuizRepository;
pub use rewards::RewardsRepository;
pub use share::{ShareFilter, ShareRepository};

/// Whether a query failed on a unique constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
