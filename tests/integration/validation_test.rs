//! Requests rejected before they reach the database.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_negative_xp_award_is_rejected() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = app
        .request(
            "POST",
            "/api/admin/gamification/student-1/award",
            Some(json!({ "amount": -5 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), Some("VALIDATION"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let token = app.student_token("student-1");

    let response = app
        .raw_request(
            "PUT",
            "/api/notifications/preferences",
            "{not json".to_string(),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_profile_field_is_rejected() {
    let app = TestApp::new();
    let token = app.student_token("student-1");

    let response = app
        .request("PUT", "/api/student/profile", Some(json!({ "nickname": "ace" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_share_method_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/shares/record",
            Some(json!({
                "opportunityId": "opp-1",
                "opportunityTitle": "Robotics Camp",
                "shareMethod": "fax",
                "platform": "mobile"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_share_code_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/shares/click", Some(json!({ "shareCode": "" })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_quiz_id_is_bad_request() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/quizzes/not-a-uuid", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), Some("VALIDATION"));
}

#[tokio::test]
async fn test_unknown_leaderboard_metric_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/leaderboard/top?metric=popularity", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let app = TestApp::new();
    let token = app.student_token("student-1");

    let response = app
        .request(
            "POST",
            "/api/gamification/actions",
            Some(json!({ "action": "teleport" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_leaderboard_delay_is_rejected() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = app
        .request(
            "POST",
            "/api/admin/quizzes",
            Some(json!({
                "title": "Science Olympiad Practice",
                "startDate": "2024-05-01T00:00:00Z",
                "endDate": "2024-05-02T00:00:00Z",
                "leaderboardSettings": { "type": "delayed", "delayHours": 4294967295u32 },
                "questions": [{
                    "id": "q1",
                    "questionText": "Water boils at?",
                    "type": "single-choice",
                    "marks": 1,
                    "options": [
                        {"id": "a", "text": "100C", "isCorrect": true},
                        {"id": "b", "text": "50C"}
                    ]
                }]
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), Some("VALIDATION"));
}

#[tokio::test]
async fn test_malformed_public_slug_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/student/profile/public/asha_k", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_kind(), Some("NOT_FOUND"));
}
