//! End-to-end flows against a real database.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tokio::task::JoinSet;

use crate::helpers::{TestApp, unique_uid};

fn quiz_body(attempt_limit: i32) -> serde_json::Value {
    json!({
        "title": "General Science Sprint",
        "startDate": "2024-05-01T00:00:00Z",
        "endDate": "2099-05-02T00:00:00Z",
        "attemptLimit": attempt_limit,
        "visibility": "published",
        "questions": [
            {
                "id": "q1",
                "questionText": "Water boils at sea level at?",
                "type": "single-choice",
                "marks": 2,
                "options": [
                    {"id": "a", "text": "100C", "isCorrect": true},
                    {"id": "b", "text": "80C"}
                ]
            },
            {
                "id": "q2",
                "questionText": "Which are planets?",
                "type": "multiple-choice",
                "marks": 2,
                "options": [
                    {"id": "a", "text": "Mars", "isCorrect": true},
                    {"id": "b", "text": "Moon"},
                    {"id": "c", "text": "Venus", "isCorrect": true}
                ]
            }
        ]
    })
}

#[tokio::test]
async fn test_quiz_register_submit_and_leaderboard() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let admin = app.admin_token();
    let student = app.student_token(&unique_uid("quiz-student"));

    let created = app
        .request("POST", "/api/admin/quizzes", Some(quiz_body(1)), Some(&admin))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["totalMarks"], 4.0);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let first = app
        .request("POST", &format!("/api/quizzes/{id}/register"), None, Some(&student))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["alreadyRegistered"], false);

    let again = app
        .request("POST", &format!("/api/quizzes/{id}/register"), None, Some(&student))
        .await;
    assert_eq!(again.body["alreadyRegistered"], true);

    let submitted = app
        .request(
            "POST",
            &format!("/api/quizzes/{id}/submit"),
            Some(json!({
                "responses": [
                    {"questionId": "q1", "selectedOptions": ["a"]},
                    {"questionId": "q2", "selectedOptions": ["a"]}
                ],
                "timeSpent": 42
            })),
            Some(&student),
        )
        .await;
    assert_eq!(submitted.status, StatusCode::OK);
    let result = &submitted.body["result"];
    assert_eq!(result["correctAnswers"], 1);
    assert_eq!(result["incorrectAnswers"], 1);
    assert_eq!(result["score"], 2.0);
    assert_eq!(result["percentage"], 50.0);

    let over_limit = app
        .request(
            "POST",
            &format!("/api/quizzes/{id}/submit"),
            Some(json!({ "responses": [], "timeSpent": 5 })),
            Some(&student),
        )
        .await;
    assert_eq!(over_limit.status, StatusCode::CONFLICT);

    let board = app
        .request("GET", &format!("/api/quizzes/{id}/leaderboard"), None, None)
        .await;
    assert_eq!(board.status, StatusCode::OK);
    assert_eq!(board.body["success"], true);
    assert_eq!(board.body["totalParticipants"], 1);
    assert_eq!(board.body["leaderboard"][0]["rank"], 1);

    let deleted = app
        .request("DELETE", &format!("/api/admin/quizzes/{id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delayed_quiz_leaderboard_is_locked() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let admin = app.admin_token();
    let mut body = quiz_body(0);
    body["leaderboardSettings"] = json!({ "type": "delayed", "delayHours": 2 });

    let created = app
        .request("POST", "/api/admin/quizzes", Some(body), Some(&admin))
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let board = app
        .request("GET", &format!("/api/quizzes/{id}/leaderboard"), None, None)
        .await;
    assert_eq!(board.status, StatusCode::FORBIDDEN);
    assert!(board.body["visibleAt"].is_string());
}

#[tokio::test]
async fn test_signed_in_share_earns_rewards() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let uid = unique_uid("sharer");
    let token = app.student_token(&uid);

    let shared = app
        .request(
            "POST",
            "/api/shares/record",
            Some(json!({
                "opportunityId": "opp-robotics",
                "opportunityTitle": "Robotics Camp",
                "shareMethod": "whatsapp",
                "platform": "mobile"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(shared.status, StatusCode::OK);
    let code = shared.body["shareCode"].as_str().unwrap().to_string();
    assert!(code.starts_with("usr_"));

    let clicked = app
        .request("POST", "/api/shares/click", Some(json!({ "shareCode": code })), None)
        .await;
    assert_eq!(clicked.status, StatusCode::OK);

    let rewards = app.request("GET", "/api/rewards/me", None, Some(&token)).await;
    assert_eq!(rewards.status, StatusCode::OK);
    assert_eq!(rewards.body["totalShares"], 1);
    assert_eq!(rewards.body["totalClicks"], 1);
    let badges = rewards.body["badges"].as_array().unwrap();
    assert_eq!(badges.iter().filter(|b| *b == "first-share").count(), 1);
}

#[tokio::test]
async fn test_anonymous_share_and_unknown_click() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };

    let shared = app
        .request(
            "POST",
            "/api/shares/record",
            Some(json!({
                "opportunityId": "opp-essay",
                "opportunityTitle": "Essay Contest",
                "shareMethod": "clipboard",
                "platform": "desktop"
            })),
            None,
        )
        .await;
    assert_eq!(shared.status, StatusCode::OK);
    assert!(shared.body["shareCode"].as_str().unwrap().starts_with("anon_"));

    let clicked = app
        .request(
            "POST",
            "/api/shares/click",
            Some(json!({ "shareCode": "anon_doesnotexist" })),
            None,
        )
        .await;
    assert_eq!(clicked.status, StatusCode::OK);
}

#[tokio::test]
async fn test_recorded_action_awards_xp() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let uid = unique_uid("xp-student");
    let token = app.student_token(&uid);

    let awarded = app
        .request(
            "POST",
            "/api/gamification/actions",
            Some(json!({ "action": "apply_opportunity" })),
            Some(&token),
        )
        .await;
    assert_eq!(awarded.status, StatusCode::OK);
    assert!(awarded.body["record"]["totalXP"].as_i64().unwrap() >= 25);

    let ranks = app
        .request("GET", "/api/leaderboard/me/rank", None, Some(&token))
        .await;
    assert_eq!(ranks.status, StatusCode::OK);
    assert!(ranks.body["globalRank"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn test_notification_preferences_merge() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.student_token(&unique_uid("prefs"));

    let defaults = app
        .request("GET", "/api/notifications/preferences", None, Some(&token))
        .await;
    assert_eq!(defaults.status, StatusCode::OK);
    assert_eq!(defaults.body["pushEnabled"], false);
    assert_eq!(defaults.body["emailFrequency"], "weekly");

    let updated = app
        .request(
            "PUT",
            "/api/notifications/preferences",
            Some(json!({ "pushEnabled": true })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["pushEnabled"], true);
    assert_eq!(updated.body["weeklyDigest"], true);
}

#[tokio::test]
async fn test_profile_created_on_first_read_and_slug_conflict() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let first = app.student_token(&unique_uid("profile-a"));
    let second = app.student_token(&unique_uid("profile-b"));

    let view = app.request("GET", "/api/student/profile", None, Some(&first)).await;
    assert_eq!(view.status, StatusCode::OK);
    assert_eq!(view.body["profile"]["visibility"], "private");
    assert_eq!(view.body["completion"]["totalSteps"], 6);

    let slug = unique_uid("asha").to_lowercase();
    let claimed = app
        .request(
            "PUT",
            "/api/student/profile",
            Some(json!({ "slug": slug, "visibility": "public" })),
            Some(&first),
        )
        .await;
    assert_eq!(claimed.status, StatusCode::OK);
    assert_eq!(claimed.body["shareablePath"], format!("/student/{slug}"));

    let taken = app
        .request(
            "PUT",
            "/api/student/profile",
            Some(json!({ "slug": slug })),
            Some(&second),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_concurrent_awards_are_not_lost() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let app = Arc::new(app);
    let admin = app.admin_token();
    let uid = unique_uid("racer");
    const AWARDS: i64 = 16;
    const AMOUNT: i64 = 15;

    let mut tasks = JoinSet::new();
    for _ in 0..AWARDS {
        let app = Arc::clone(&app);
        let admin = admin.clone();
        let path = format!("/api/admin/gamification/{uid}/award");
        tasks.spawn(async move {
            app.request("POST", &path, Some(json!({ "amount": AMOUNT })), Some(&admin))
                .await
        });
    }
    while let Some(joined) = tasks.join_next().await {
        let response = joined.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body["newBadges"].as_array().unwrap().is_empty());
    }

    let token = app.student_token(&uid);
    let record = app.request("GET", "/api/gamification/me", None, Some(&token)).await;
    assert_eq!(record.body["totalXP"], AWARDS * AMOUNT);

    // The same total in one award must land on the same level.
    let single = unique_uid("single");
    let once = app
        .request(
            "POST",
            &format!("/api/admin/gamification/{single}/award"),
            Some(json!({ "amount": AWARDS * AMOUNT })),
            Some(&admin),
        )
        .await;
    assert_eq!(once.body["record"]["totalXP"], AWARDS * AMOUNT);
    assert_eq!(record.body["level"], once.body["record"]["level"]);
}

#[tokio::test]
async fn test_clearing_school_leaves_school_board() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let uid = unique_uid("mover");
    let token = app.student_token(&uid);
    let school = unique_uid("school");
    let board_path = format!("/api/leaderboard/school/{school}");

    let joined = app
        .request(
            "PUT",
            "/api/student/profile",
            Some(json!({ "schoolId": school, "schoolInfo": { "schoolName": "Green Valley" } })),
            Some(&token),
        )
        .await;
    assert_eq!(joined.status, StatusCode::OK);

    let board = app.request("GET", &board_path, None, None).await;
    let listed = |body: &serde_json::Value| {
        body["entries"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["uid"] == uid.as_str())
    };
    assert!(listed(&board.body));

    let left = app
        .request("PUT", "/api/student/profile", Some(json!({ "schoolId": null })), Some(&token))
        .await;
    assert_eq!(left.status, StatusCode::OK);

    let board = app.request("GET", &board_path, None, None).await;
    assert!(!listed(&board.body));

    let record = app.request("GET", "/api/gamification/me", None, Some(&token)).await;
    assert!(record.body["schoolId"].is_null());
}

#[tokio::test]
async fn test_public_profile_only_when_public() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.student_token(&unique_uid("public"));
    let slug = unique_uid("ravi").to_lowercase();
    let path = format!("/api/student/profile/public/{}", slug.to_uppercase());

    let saved = app
        .request(
            "PUT",
            "/api/student/profile",
            Some(json!({ "slug": slug, "tagline": "Robotics and chess", "location": "Pune" })),
            Some(&token),
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK);

    let hidden = app.request("GET", &path, None, None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    app.request(
        "PUT",
        "/api/student/profile",
        Some(json!({ "visibility": "public" })),
        Some(&token),
    )
    .await;

    let shown = app.request("GET", &path, None, None).await;
    assert_eq!(shown.status, StatusCode::OK);
    assert_eq!(shown.body["item"]["slug"], slug.as_str());
    assert_eq!(shown.body["item"]["tagline"], "Robotics and chess");
    assert!(shown.body["item"].get("location").is_none());

    let missing = app
        .request("GET", "/api/student/profile/public/nobody-here-at-all", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
