//! Account settings endpoint tests

use super::{get, post_json, put_json, TestAppState, TEST_PASSWORD};
use axum::http::StatusCode;
use folio_core::identity::IdentityProvider;
use serde_json::json;

#[tokio::test]
async fn test_display_name_change_without_password() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = put_json(
        &app,
        "/api/v1/account",
        Some(&token),
        &json!({"display_name": "Mina", "email": "student@example.com", "new_password": ""}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["display_name"], "Mina");
    assert!(response.data().get("token").is_none());

    let profile = get(&app, "/api/v1/profile", Some(&token)).await;
    assert_eq!(profile.data()["display_name"], "Mina");
}

#[tokio::test]
async fn test_password_change_requires_current_password() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let missing = put_json(
        &app,
        "/api/v1/account",
        Some(&token),
        &json!({"new_password": "brand-new-pass"}),
    )
    .await;
    assert_eq!(missing.status, StatusCode::UNPROCESSABLE_ENTITY);

    let wrong = put_json(
        &app,
        "/api/v1/account",
        Some(&token),
        &json!({"current_password": "not-my-password", "new_password": "brand-new-pass"}),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    // The old password still works
    assert!(state
        .identity_provider
        .sign_in("student@example.com", TEST_PASSWORD)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_email_and_password_change_after_reauthentication() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = put_json(
        &app,
        "/api/v1/account",
        Some(&token),
        &json!({
            "email": "mina@example.com",
            "current_password": TEST_PASSWORD,
            "new_password": "brand-new-pass"
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "mina@example.com");
    let fresh = response.data()["token"].as_str().unwrap().to_string();

    let me = get(&app, "/api/v1/auth/me", Some(&fresh)).await;
    assert_eq!(me.status, StatusCode::OK);

    let old = post_json(
        &app,
        "/api/v1/auth/sign-in",
        None,
        &json!({"email": "student@example.com", "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = post_json(
        &app,
        "/api/v1/auth/sign-in",
        None,
        &json!({"email": "mina@example.com", "password": "brand-new-pass"}),
    )
    .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_email_taken_by_another_account() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    state.sign_up("taken@example.com").await;
    let (_, token) = state.sign_up("student@example.com").await;

    let response = put_json(
        &app,
        "/api/v1/account",
        Some(&token),
        &json!({"email": "taken@example.com", "current_password": TEST_PASSWORD}),
    )
    .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}
