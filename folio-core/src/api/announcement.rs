//! Announcement API handlers

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{AnnouncementInput, RecordId};
use crate::error::Result;
use crate::middleware::AuthPrincipal;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List announcements, newest first
pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let announcements = state.announcement_service().list().await?;
    Ok(Json(SuccessResponse::new(announcements)))
}

pub async fn publish<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(input): Json<AnnouncementInput>,
) -> Result<impl IntoResponse> {
    let announcement = state
        .announcement_service()
        .publish(&principal.uid, input)
        .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(announcement))))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<RecordId>,
) -> Result<impl IntoResponse> {
    state.announcement_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Announcement deleted")))
}
