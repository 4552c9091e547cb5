//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an empty file is valid.

pub mod app;
pub mod auth;
pub mod database;
pub mod gamification;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::gamification::{
    GamificationConfig, LeaderboardConfig, LevelConfig, QuizConfig, XpRewardsConfig,
};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// XP, level, and leaderboard tuning.
    #[serde(default)]
    pub gamification: GamificationConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `MYARK__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MYARK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: AppConfig = config::Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.gamification.xp_rewards.apply_opportunity, 25);
        assert_eq!(config.gamification.xp_rewards.badge_earned, 25);
        assert_eq!(config.gamification.level.max_level, 50);
        assert_eq!(config.gamification.leaderboard.global_top_n, 100);
        assert_eq!(config.gamification.leaderboard.school_top_n, 50);
        assert_eq!(config.gamification.quiz.default_delay_hours, 24);
    }

    #[test]
    fn test_partial_override() {
        let config: AppConfig = config::Config::builder()
            .set_override("server.port", 9000)
            .unwrap()
            .set_override("gamification.level.base_xp", 200)
            .unwrap()
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.gamification.level.base_xp, 200);
        assert_eq!(config.gamification.level.increment, 50);
    }
}
