//! Quizzes: authoring, registration, scoring, and gated leaderboards.

pub mod scoring;
pub mod service;
pub mod visibility;

pub use scoring::{ScoreResult, evaluate};
pub use service::{
    LeaderboardOutcome, QuizLeaderboard, QuizResult, QuizService, QuizView, RankedQuizEntry,
    RegistrationOutcome, RegistrationStatus, validate_definition,
};
pub use visibility::{LeaderboardAccess, check_access};
