//! Profile and portfolio endpoint tests

use super::{get, post_file, post_json, put_json, TestAppState, UploadPreset};
use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_first_access_seeds_private_profile() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = get(&app, "/api/v1/profile", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let profile = response.data();
    assert_eq!(profile["email"], "student@example.com");
    assert_eq!(profile["role"], "user");
    assert_eq!(profile["visibility"], "private");
}

#[tokio::test]
async fn test_update_accepts_comma_separated_skills() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = put_json(
        &app,
        "/api/v1/profile",
        Some(&token),
        &json!({"display_name": "Mina", "skills": "Figma, Rust, "}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["display_name"], "Mina");
    assert_eq!(response.data()["skills"], json!(["Figma", "Rust"]));
}

#[tokio::test]
async fn test_photo_falls_back_to_second_preset() {
    let media = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/auto/upload"))
        .and(UploadPreset("folio_unsigned"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Upload preset not found"))
        .expect(1)
        .mount(&media)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/auto/upload"))
        .and(UploadPreset("ml_default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://res.example.com/demo/me.jpg"
        })))
        .mount(&media)
        .await;

    let state = TestAppState::with_media(&media.uri());
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = post_file(
        &app,
        "/api/v1/profile/photo",
        Some(&token),
        "me.jpg",
        "image/jpeg",
        &[0xff, 0xd8, 0xff],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["photo_url"], "https://res.example.com/demo/me.jpg");
}

#[tokio::test]
async fn test_photo_must_be_an_image() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = post_file(
        &app,
        "/api/v1/profile/photo",
        Some(&token),
        "cv.pdf",
        "application/pdf",
        b"%PDF-1.7",
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_photo_without_cloud_name_is_media_error() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = post_file(
        &app,
        "/api/v1/profile/photo",
        Some(&token),
        "me.png",
        "image/png",
        b"png",
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_portfolio_collects_records_with_template_and_style() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, admin_token) = state.sign_up_claim_admin("boss@example.com").await;
    let (_, token) = state.sign_up("student@example.com").await;

    post_json(&app, "/api/v1/admin/templates/initialize", Some(&admin_token), &json!({})).await;
    put_json(
        &app,
        "/api/v1/profile",
        Some(&token),
        &json!({"portfolio_title": "Mina's Work", "skills": ["Figma"]}),
    )
    .await;
    post_json(
        &app,
        "/api/v1/education",
        Some(&token),
        &json!({"degree": "High School", "gpa": 3.6, "period": "2019-2022"}),
    )
    .await;
    post_json(
        &app,
        "/api/v1/works",
        Some(&token),
        &json!({"title": "Poster", "description": "A2 poster"}),
    )
    .await;

    let response = get(
        &app,
        "/api/v1/portfolio?template=modern&style=missing",
        Some(&token),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let portfolio = response.data();
    assert_eq!(portfolio["title"], "Mina's Work");
    assert_eq!(portfolio["skills"], json!(["Figma"]));
    assert_eq!(portfolio["educations"].as_array().unwrap().len(), 1);
    assert_eq!(portfolio["works"].as_array().unwrap().len(), 1);
    assert_eq!(portfolio["template"]["id"], "modern");
    assert_eq!(portfolio["style"]["id"], "default");
}

#[tokio::test]
async fn test_portfolio_with_unknown_template_is_not_found() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = get(&app, "/api/v1/portfolio?template=poster", Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
