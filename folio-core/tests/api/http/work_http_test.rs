//! Work endpoint tests, including attachment uploads to a mock media host

use super::{delete, get, post_file, post_json, TestAppState};
use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn create(app: &axum::Router, token: &str, title: &str, category: &str, tags: &str) {
    let response = post_json(
        app,
        "/api/v1/works",
        Some(token),
        &json!({
            "title": title,
            "category": category,
            "year": "2025",
            "description": format!("{} description", title),
            "tags": tags,
        }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_filters_by_text_and_category() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    create(&app, &token, "Robot Arm", "research", "arduino, servo").await;
    create(&app, &token, "Poster", "design", "print").await;
    create(&app, &token, "Portfolio Site", "web_development", "react").await;

    let all = get(&app, "/api/v1/works", Some(&token)).await;
    assert_eq!(all.data().as_array().unwrap().len(), 3);

    let by_tag = get(&app, "/api/v1/works?q=ARDU", Some(&token)).await;
    let titles: Vec<_> = by_tag
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Robot Arm"]);

    let by_category = get(&app, "/api/v1/works?category=design", Some(&token)).await;
    assert_eq!(by_category.data().as_array().unwrap().len(), 1);
    assert_eq!(by_category.data()[0]["title"], "Poster");
}

#[tokio::test]
async fn test_other_user_cannot_delete_work() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, owner_token) = state.sign_up("owner@example.com").await;
    let (_, other_token) = state.sign_up("other@example.com").await;

    create(&app, &owner_token, "Poster", "design", "").await;
    let listed = get(&app, "/api/v1/works", Some(&owner_token)).await;
    let path = format!("/api/v1/works/{}", listed.data()[0]["id"].as_str().unwrap());

    assert_eq!(delete(&app, &path, Some(&other_token)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(delete(&app, &path, Some(&owner_token)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_upload_then_attach() {
    let media = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/auto/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://res.example.com/demo/poster.png"
        })))
        .expect(1)
        .mount(&media)
        .await;

    let state = TestAppState::with_media(&media.uri());
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let uploaded = post_file(
        &app,
        "/api/v1/works/upload",
        Some(&token),
        "poster.png",
        "image/png",
        &[0x89, 0x50, 0x4e, 0x47],
    )
    .await;
    assert_eq!(uploaded.status, StatusCode::CREATED);
    assert_eq!(uploaded.data()["url"], "https://res.example.com/demo/poster.png");
    assert_eq!(uploaded.data()["size"], 4);

    let created = post_json(
        &app,
        "/api/v1/works",
        Some(&token),
        &json!({
            "title": "Poster",
            "description": "A2 poster",
            "attachment": uploaded.data(),
        }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["file_path"], "https://res.example.com/demo/poster.png");
    assert_eq!(created.data()["file_type"], "image/png");
}

#[tokio::test]
async fn test_upload_rejects_disallowed_type() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = post_file(
        &app,
        "/api/v1/works/upload",
        Some(&token),
        "anim.gif",
        "image/gif",
        b"GIF89a",
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_rejected_by_every_preset() {
    let media = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Upload preset not found"))
        .mount(&media)
        .await;

    let state = TestAppState::with_media(&media.uri());
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = post_file(
        &app,
        "/api/v1/works/upload",
        Some(&token),
        "report.pdf",
        "application/pdf",
        b"%PDF-1.7",
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(media.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_upload_requires_session() {
    let app = super::build_test_router(TestAppState::new());

    let response = post_file(
        &app,
        "/api/v1/works/upload",
        None,
        "poster.png",
        "image/png",
        b"png",
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
}
