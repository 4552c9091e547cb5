//! Admin handlers. Every handler checks the admin role first.

pub mod gamification;
pub mod quizzes;
