//! Template and template style endpoint tests

use super::{delete, get, post_json, put_json, TestAppState};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_initialize_defaults_is_idempotent() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, admin_token) = state.sign_up_claim_admin("boss@example.com").await;
    let (_, student_token) = state.sign_up("student@example.com").await;

    let first = post_json(&app, "/api/v1/admin/templates/initialize", Some(&admin_token), &json!({})).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["created"], 3);

    let second = post_json(&app, "/api/v1/admin/templates/initialize", Some(&admin_token), &json!({})).await;
    assert_eq!(second.data()["created"], 0);

    let active = get(&app, "/api/v1/templates", Some(&student_token)).await;
    assert_eq!(active.data().as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_students_cannot_manage_templates() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, token) = state.sign_up("student@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/admin/templates",
        Some(&token),
        &json!({"name": "Mine"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_template_lifecycle_records_actor() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (admin, admin_token) = state.sign_up_claim_admin("boss@example.com").await;
    let (_, student_token) = state.sign_up("student@example.com").await;

    let created = post_json(
        &app,
        "/api/v1/admin/templates",
        Some(&admin_token),
        &json!({"name": "Gallery Wall", "kind": "gallery"}),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["created_by"], admin.uid.as_str());
    let id = created.data()["id"].as_str().unwrap().to_string();

    // Deactivated templates drop out of the student listing
    let updated = put_json(
        &app,
        &format!("/api/v1/admin/templates/{}", id),
        Some(&admin_token),
        &json!({"name": "Gallery Wall", "kind": "gallery", "is_active": false}),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);

    let active = get(&app, "/api/v1/templates", Some(&student_token)).await;
    assert!(active.data().as_array().unwrap().is_empty());
    let all = get(&app, "/api/v1/admin/templates", Some(&admin_token)).await;
    assert_eq!(all.data().as_array().unwrap().len(), 1);

    let deleted = delete(&app, &format!("/api/v1/admin/templates/{}", id), Some(&admin_token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    let missing = get(&app, &format!("/api/v1/templates/{}", id), Some(&student_token)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_published_styles_fall_back_to_default() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, admin_token) = state.sign_up_claim_admin("boss@example.com").await;
    let (_, student_token) = state.sign_up("student@example.com").await;

    let created = post_json(
        &app,
        "/api/v1/admin/template-styles",
        Some(&admin_token),
        &json!({"name": "Dark", "primary_color": "#111827"}),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let styles = get(&app, "/api/v1/template-styles", Some(&student_token)).await;
    assert_eq!(styles.data()[0]["name"], "Dark");

    state.style_repo.set_failing(true);
    let fallback = get(&app, "/api/v1/template-styles", Some(&student_token)).await;
    assert_eq!(fallback.status, StatusCode::OK);
    let fallback = fallback.data().as_array().unwrap().clone();
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback[0]["id"], "default");

    // Administration surfaces the failure instead
    let admin_list = get(&app, "/api/v1/admin/template-styles", Some(&admin_token)).await;
    assert_eq!(admin_list.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unpublished_style_is_hidden_from_students() {
    let state = TestAppState::new();
    let app = super::build_test_router(state.clone());
    let (_, admin_token) = state.sign_up_claim_admin("boss@example.com").await;
    let (_, student_token) = state.sign_up("student@example.com").await;

    let created = post_json(
        &app,
        "/api/v1/admin/template-styles",
        Some(&admin_token),
        &json!({"name": "Draft", "is_published": false}),
    )
    .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let styles = get(&app, "/api/v1/template-styles", Some(&student_token)).await;
    assert!(styles.data().as_array().unwrap().is_empty());

    let removed = delete(
        &app,
        &format!("/api/v1/admin/template-styles/{}", id),
        Some(&admin_token),
    )
    .await;
    assert_eq!(removed.status, StatusCode::OK);

    let again = delete(
        &app,
        &format!("/api/v1/admin/template-styles/{}", id),
        Some(&admin_token),
    )
    .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
