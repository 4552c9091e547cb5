//! Response DTOs.

use serde::Serialize;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success response whose payload fields sit beside `success`.
#[derive(Debug, Clone, Serialize)]
pub struct FlatResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> FlatResponse<T> {
    pub fn ok(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

/// GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use myark_service::quiz::QuizLeaderboard;

    #[test]
    fn test_quiz_leaderboard_is_flat() {
        let value = serde_json::to_value(FlatResponse::ok(QuizLeaderboard {
            leaderboard: Vec::new(),
            total_participants: 0,
        }))
        .unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["totalParticipants"], 0);
        assert!(value["leaderboard"].is_array());
        assert!(value.get("data").is_none());
    }
}
