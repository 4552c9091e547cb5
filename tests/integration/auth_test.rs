//! Bearer token and role checks.

use axum::http::StatusCode;

use myark_auth::{JwtEncoder, Role};
use myark_core::config::AuthConfig;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/gamification/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_kind(), Some("AUTHENTICATION"));
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/student/profile", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let app = TestApp::new();
    let foreign = AuthConfig {
        jwt_secret: "some-other-secret".to_string(),
        ..app.config.auth.clone()
    };
    let token = JwtEncoder::new(&foreign)
        .issue("u1", None, None, Role::Student)
        .unwrap();

    let response = app
        .request("GET", "/api/rewards/me", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_share_analytics_requires_admin() {
    let app = TestApp::new();
    let token = app.student_token("student-1");

    let response = app
        .request("GET", "/api/shares/analytics", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_kind(), Some("AUTHORIZATION"));
}

#[tokio::test]
async fn test_reward_config_update_requires_admin() {
    let app = TestApp::new();
    let token = app.student_token("student-1");

    let response = app
        .request(
            "PUT",
            "/api/rewards/config",
            Some(serde_json::json!({
                "enabled": true,
                "pointsPerShare": 10,
                "pointsPerClick": 5,
                "pointsPerConversion": 50,
                "badges": []
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_quiz_creation_requires_admin() {
    let app = TestApp::new();
    let token = app.student_token("student-1");

    let response = app
        .request(
            "POST",
            "/api/admin/quizzes",
            Some(serde_json::json!({
                "title": "Science Olympiad Practice",
                "startDate": "2024-05-01T00:00:00Z",
                "endDate": "2024-05-02T00:00:00Z",
                "questions": [{
                    "id": "q1",
                    "questionText": "Water boils at?",
                    "type": "single-choice",
                    "marks": 1,
                    "options": [
                        {"id": "a", "text": "100C", "isCorrect": true},
                        {"id": "b", "text": "50C", "isCorrect": false}
                    ]
                }]
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
