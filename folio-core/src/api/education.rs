//! Education API handlers

use crate::api::{require_owner_or_admin, resolve_owner, MessageResponse, OwnerQuery, SuccessResponse};
use crate::domain::{EducationInput, RecordId};
use crate::error::Result;
use crate::middleware::AuthPrincipal;
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List education records, newest first
pub async fn list<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(query): Query<OwnerQuery>,
) -> Result<impl IntoResponse> {
    let owner = resolve_owner(&state, &principal, query).await?;
    let records = state.education_service().list(&owner).await?;
    Ok(Json(SuccessResponse::new(records)))
}

pub async fn get<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<RecordId>,
) -> Result<impl IntoResponse> {
    let record = state.education_service().get(id).await?;
    require_owner_or_admin(&state, &principal, &record.user_id).await?;
    Ok(Json(SuccessResponse::new(record)))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(input): Json<EducationInput>,
) -> Result<impl IntoResponse> {
    let record = state
        .education_service()
        .create(&principal.uid, input)
        .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(record))))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<RecordId>,
    Json(input): Json<EducationInput>,
) -> Result<impl IntoResponse> {
    let existing = state.education_service().get(id).await?;
    require_owner_or_admin(&state, &principal, &existing.user_id).await?;

    let record = state.education_service().update(existing, input).await?;
    Ok(Json(SuccessResponse::new(record)))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<RecordId>,
) -> Result<impl IntoResponse> {
    let existing = state.education_service().get(id).await?;
    require_owner_or_admin(&state, &principal, &existing.user_id).await?;

    state.education_service().delete(&existing).await?;
    Ok(Json(MessageResponse::new("Education record deleted")))
}
