//! Template and template style API handlers

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{TemplateInput, TemplateStyleInput};
use crate::error::Result;
use crate::middleware::AuthPrincipal;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

// ============================================================================
// Student-facing
// ============================================================================

/// List active templates
pub async fn list_active<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let templates = state.template_service().list_active().await?;
    Ok(Json(SuccessResponse::new(templates)))
}

pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let template = state.template_service().get(&id).await?;
    Ok(Json(SuccessResponse::new(template)))
}

/// List published styles. Never fails: a broken style registry yields the
/// built-in default style.
pub async fn list_published_styles<S: HasServices>(State(state): State<S>) -> impl IntoResponse {
    let styles = state.template_service().list_published_styles().await;
    Json(SuccessResponse::new(styles))
}

// ============================================================================
// Administration
// ============================================================================

pub async fn list_all<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let templates = state.template_service().list_all().await?;
    Ok(Json(SuccessResponse::new(templates)))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(input): Json<TemplateInput>,
) -> Result<impl IntoResponse> {
    let template = state
        .template_service()
        .create(input, &principal.uid)
        .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(template))))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<String>,
    Json(input): Json<TemplateInput>,
) -> Result<impl IntoResponse> {
    let template = state
        .template_service()
        .update(&id, input, &principal.uid)
        .await?;
    Ok(Json(SuccessResponse::new(template)))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.template_service().delete(&id).await?;
    Ok(Json(MessageResponse::new("Template deleted")))
}

#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub created: usize,
}

/// Install the built-in templates that are missing
pub async fn initialize_defaults<S: HasServices>(
    State(state): State<S>,
) -> Result<impl IntoResponse> {
    let created = state.template_service().initialize_defaults().await?;
    Ok(Json(SuccessResponse::new(InitializeResponse { created })))
}

pub async fn list_all_styles<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let styles = state.template_service().list_all_styles().await?;
    Ok(Json(SuccessResponse::new(styles)))
}

pub async fn create_style<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<TemplateStyleInput>,
) -> Result<impl IntoResponse> {
    let style = state.template_service().create_style(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(style))))
}

pub async fn update_style<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
    Json(input): Json<TemplateStyleInput>,
) -> Result<impl IntoResponse> {
    let style = state.template_service().update_style(&id, input).await?;
    Ok(Json(SuccessResponse::new(style)))
}

pub async fn delete_style<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.template_service().delete_style(&id).await?;
    Ok(Json(MessageResponse::new("Template style deleted")))
}
