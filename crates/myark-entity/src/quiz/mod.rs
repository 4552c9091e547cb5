//! Quiz domain entities.

pub mod attempt;
pub mod leaderboard;
pub mod model;

pub use attempt::{QuizAttempt, QuizRegistration, QuizResponse};
pub use leaderboard::{LeaderboardVisibility, QuizLeaderboardEntry, VisibilityType};
pub use model::{QuestionType, Quiz, QuizOption, QuizQuestion, QuizSettings, QuizVisibility};
