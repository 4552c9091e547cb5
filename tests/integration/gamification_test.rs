//! Gamification endpoints that need no stored data.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_badge_catalogue_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/gamification/badges", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let badges = response.body.as_array().expect("catalogue is a list");
    assert!(!badges.is_empty());
}
