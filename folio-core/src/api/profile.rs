//! Profile API handlers

use crate::api::{read_upload, SuccessResponse};
use crate::domain::UpdateProfileInput;
use crate::error::{AppError, Result};
use crate::media::MediaHost;
use crate::middleware::AuthPrincipal;
use crate::state::HasServices;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};

/// Get the caller's profile, seeding it on first access
pub async fn get<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service().get_or_seed(&principal).await?;
    Ok(Json(SuccessResponse::new(profile)))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(input): Json<UpdateProfileInput>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service().update(&principal, input).await?;
    Ok(Json(SuccessResponse::new(profile)))
}

/// Upload a profile photo to the media host and store its URL
pub async fn upload_photo<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let file = read_upload(multipart).await?;
    if !file.content_type.starts_with("image/") {
        return Err(AppError::Validation(
            "Profile photo must be an image".to_string(),
        ));
    }

    let url = state
        .media_host()
        .upload(&file.file_name, &file.content_type, file.bytes)
        .await?;
    let profile = state.profile_service().set_photo(&principal, url).await?;
    Ok(Json(SuccessResponse::new(profile)))
}
