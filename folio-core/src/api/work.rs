//! Work API handlers

use crate::api::{
    read_upload, require_owner_or_admin, resolve_owner, MessageResponse, OwnerQuery,
    SuccessResponse,
};
use crate::domain::{Attachment, RecordId, WorkFilter, WorkInput};
use crate::error::Result;
use crate::media::MediaHost;
use crate::middleware::AuthPrincipal;
use crate::state::HasServices;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List works, optionally filtered by search text and category
pub async fn list<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(owner): Query<OwnerQuery>,
    Query(filter): Query<WorkFilter>,
) -> Result<impl IntoResponse> {
    let owner = resolve_owner(&state, &principal, owner).await?;
    let works = state.work_service().list(&owner, &filter).await?;
    Ok(Json(SuccessResponse::new(works)))
}

pub async fn get<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<RecordId>,
) -> Result<impl IntoResponse> {
    let work = state.work_service().get(id).await?;
    require_owner_or_admin(&state, &principal, &work.user_id).await?;
    Ok(Json(SuccessResponse::new(work)))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(input): Json<WorkInput>,
) -> Result<impl IntoResponse> {
    let work = state.work_service().create(&principal.uid, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(work))))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<RecordId>,
    Json(input): Json<WorkInput>,
) -> Result<impl IntoResponse> {
    let existing = state.work_service().get(id).await?;
    require_owner_or_admin(&state, &principal, &existing.user_id).await?;

    let work = state.work_service().update(existing, input).await?;
    Ok(Json(SuccessResponse::new(work)))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<RecordId>,
) -> Result<impl IntoResponse> {
    let existing = state.work_service().get(id).await?;
    require_owner_or_admin(&state, &principal, &existing.user_id).await?;

    state.work_service().delete(&existing).await?;
    Ok(Json(MessageResponse::new("Work deleted")))
}

/// Upload a work attachment. The returned metadata is sent back as the
/// `attachment` of a work create or update.
pub async fn upload<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let file = read_upload(multipart).await?;
    let size = file.bytes.len() as u64;

    let url = state
        .media_host()
        .upload(&file.file_name, &file.content_type, file.bytes)
        .await?;
    tracing::info!(uid = %principal.uid, size, "Work attachment uploaded");

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new(Attachment {
            url,
            content_type: file.content_type,
            size,
        })),
    ))
}
