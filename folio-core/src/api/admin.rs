//! Administrator API handlers
//!
//! Every route here sits behind the administrator route guard.

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::ProfileRole;
use crate::error::Result;
use crate::service::{GrantAdminInput, PortfolioSelection};
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SetRoleInput {
    pub role: ProfileRole,
}

/// List all user profiles
pub async fn list_users<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let profiles = state.admin_service().list_profiles().await?;
    Ok(Json(SuccessResponse::new(profiles)))
}

/// Change a profile's role label
pub async fn set_role<S: HasServices>(
    State(state): State<S>,
    Path(uid): Path<String>,
    Json(input): Json<SetRoleInput>,
) -> Result<impl IntoResponse> {
    state.admin_service().set_role_label(&uid, input.role).await?;
    Ok(Json(MessageResponse::new(format!(
        "Role label set to {}",
        input.role
    ))))
}

/// View another user's assembled portfolio
pub async fn user_portfolio<S: HasServices>(
    State(state): State<S>,
    Path(uid): Path<String>,
    Query(selection): Query<PortfolioSelection>,
) -> Result<impl IntoResponse> {
    let portfolio = state.portfolio_service().for_user(&uid, &selection).await?;
    Ok(Json(SuccessResponse::new(portfolio)))
}

pub async fn list_registry<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let records = state.admin_service().list_registry().await?;
    Ok(Json(SuccessResponse::new(records)))
}

pub async fn grant<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<GrantAdminInput>,
) -> Result<impl IntoResponse> {
    let record = state.admin_service().grant(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(record))))
}

pub async fn revoke<S: HasServices>(
    State(state): State<S>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse> {
    state.admin_service().revoke(&uid).await?;
    Ok(Json(MessageResponse::new("Administrator record removed")))
}
