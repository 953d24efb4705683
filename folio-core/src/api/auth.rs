//! Authentication API handlers

use crate::api::SuccessResponse;
use crate::authz::Classification;
use crate::domain::Principal;
use crate::error::Result;
use crate::identity::{CredentialsInput, IdentityProvider};
use crate::middleware::AuthPrincipal;
use crate::service::RegisterAdminInput;
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use validator::Validate;

/// Who the caller is and how the role resolver classifies them
#[derive(Debug, Serialize)]
pub struct CurrentPrincipal {
    pub principal: Principal,
    pub classification: Classification,
}

/// Create credentials and sign straight in
pub async fn sign_up<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CredentialsInput>,
) -> Result<impl IntoResponse> {
    input.validate()?;

    let provider = state.identity_provider();
    provider.sign_up(&input.email, &input.password).await?;
    let session = provider.sign_in(&input.email, &input.password).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(session))))
}

pub async fn sign_in<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CredentialsInput>,
) -> Result<impl IntoResponse> {
    let session = state
        .identity_provider()
        .sign_in(&input.email, &input.password)
        .await?;
    Ok(Json(SuccessResponse::new(session)))
}

/// Mint a fresh token carrying the caller's current custom claims
pub async fn refresh<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<impl IntoResponse> {
    let refreshed = state.identity_provider().refresh_token(&principal).await?;
    Ok(Json(SuccessResponse::new(refreshed)))
}

pub async fn me<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<impl IntoResponse> {
    let classification = state.role_resolver().classify(Some(&principal)).await;
    Ok(Json(SuccessResponse::new(CurrentPrincipal {
        principal,
        classification,
    })))
}

/// Self-service administrator registration
pub async fn register_admin<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<RegisterAdminInput>,
) -> Result<impl IntoResponse> {
    let record = state.admin_service().register_admin(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(record))))
}
