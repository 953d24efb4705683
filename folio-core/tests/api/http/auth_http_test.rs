//! Authentication endpoint tests

use super::{get, post_json, TestAppState, ENROLLMENT_SECRET, TEST_PASSWORD};
use axum::http::StatusCode;
use folio_core::identity::IdentityProvider;
use serde_json::json;

#[tokio::test]
async fn test_sign_up_returns_session() {
    let app = super::build_test_router(TestAppState::new());

    let response = post_json(
        &app,
        "/api/v1/auth/sign-up",
        None,
        &json!({"email": "New@Example.com", "password": TEST_PASSWORD}),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = response.data();
    assert_eq!(data["principal"]["email"], "new@example.com");
    assert!(data["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_sign_up_rejects_duplicate_email() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    state.sign_up("taken@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/auth/sign-up",
        None,
        &json!({"email": "taken@example.com", "password": TEST_PASSWORD}),
    )
    .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_sign_up_validates_input() {
    let app = super::build_test_router(TestAppState::new());

    let response = post_json(
        &app,
        "/api/v1/auth/sign-up",
        None,
        &json!({"email": "not-an-email", "password": "123"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sign_in_with_wrong_password() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    state.sign_up("student@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/auth/sign-in",
        None,
        &json!({"email": "student@example.com", "password": "wrong-password"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_in_token_opens_member_routes() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    state.sign_up("student@example.com").await;

    let signed_in = post_json(
        &app,
        "/api/v1/auth/sign-in",
        None,
        &json!({"email": "student@example.com", "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(signed_in.status, StatusCode::OK);
    let token = signed_in.data()["token"].as_str().unwrap().to_string();

    let me = get(&app, "/api/v1/auth/me", Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["principal"]["email"], "student@example.com");
}

#[tokio::test]
async fn test_refresh_picks_up_new_claims() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (principal, token) = state.sign_up("student@example.com").await;

    let before = post_json(&app, "/api/v1/auth/refresh", Some(&token), &json!({})).await;
    assert_eq!(before.status, StatusCode::OK);
    assert!(before.data()["claims"].get("admin").is_none());

    state
        .identity_provider
        .set_custom_claims(&principal.uid, folio_core::domain::TokenClaims::admin())
        .await
        .unwrap();

    let after = post_json(&app, "/api/v1/auth/refresh", Some(&token), &json!({})).await;
    assert_eq!(after.data()["claims"]["admin"], true);
}

#[tokio::test]
async fn test_register_admin_creates_registry_record() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());

    let response = post_json(
        &app,
        "/api/v1/auth/register-admin",
        None,
        &json!({
            "email": "boss@example.com",
            "password": ENROLLMENT_SECRET,
            "password_confirm": ENROLLMENT_SECRET,
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["username"], "boss@example.com");

    // The new administrator passes the guard through the registry
    let (_, token) = state
        .identity_provider
        .sign_in("boss@example.com", ENROLLMENT_SECRET)
        .await
        .map(|s| (s.principal, s.token))
        .unwrap();
    let users = get(&app, "/api/v1/admin/users", Some(&token)).await;
    assert_eq!(users.status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_admin_rejects_unlisted_email() {
    let app = super::build_test_router(TestAppState::new());

    let response = post_json(
        &app,
        "/api/v1/auth/register-admin",
        None,
        &json!({
            "email": "intruder@example.com",
            "password": ENROLLMENT_SECRET,
            "password_confirm": ENROLLMENT_SECRET,
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_admin_rejects_wrong_secret() {
    let app = super::build_test_router(TestAppState::new());

    let mismatch = post_json(
        &app,
        "/api/v1/auth/register-admin",
        None,
        &json!({
            "email": "boss@example.com",
            "password": "sunshine",
            "password_confirm": "sunrise!",
        }),
    )
    .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);

    let wrong = post_json(
        &app,
        "/api/v1/auth/register-admin",
        None,
        &json!({
            "email": "boss@example.com",
            "password": "sunshine",
            "password_confirm": "sunshine",
        }),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
}
