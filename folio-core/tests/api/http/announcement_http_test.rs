//! Announcement endpoint tests

use super::{delete, get, post_json, TestAppState};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_administrator_publishes_and_students_read_newest_first() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, admin_token) = state.sign_up_claim_admin("boss@example.com").await;
    let (_, student_token) = state.sign_up("student@example.com").await;

    for title in ["Orientation", "Portfolio deadline"] {
        let response = post_json(
            &app,
            "/api/v1/admin/announcements",
            Some(&admin_token),
            &json!({"title": title, "content": "See the notice board"}),
        )
        .await;
        assert_eq!(response.status, StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let response = get(&app, "/api/v1/announcements", Some(&student_token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let titles: Vec<_> = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Portfolio deadline", "Orientation"]);
}

#[tokio::test]
async fn test_students_cannot_publish() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, student_token) = state.sign_up("student@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/admin/announcements",
        Some(&student_token),
        &json!({"title": "Free pizza", "content": "Room 101"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_signed_out_visitor_is_redirected() {
    let state = TestAppState::new();
    let app = super::build_test_router(state);

    let response = get(&app, "/api/v1/announcements", None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some(super::SIGN_IN_PATH));
}

#[tokio::test]
async fn test_delete_announcement() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, admin_token) = state.sign_up_registry_admin("boss@example.com").await;

    let created = post_json(
        &app,
        "/api/v1/admin/announcements",
        Some(&admin_token),
        &json!({"title": "Exam week", "content": "Library open late"}),
    )
    .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let path = format!("/api/v1/admin/announcements/{}", id);
    assert_eq!(delete(&app, &path, Some(&admin_token)).await.status, StatusCode::OK);
    assert_eq!(
        delete(&app, &path, Some(&admin_token)).await.status,
        StatusCode::NOT_FOUND
    );

    let listed = get(&app, "/api/v1/announcements", Some(&admin_token)).await;
    assert!(listed.data().as_array().unwrap().is_empty());
}
