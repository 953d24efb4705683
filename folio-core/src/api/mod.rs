//! REST API shared utilities (response types, ownership checks, uploads)

pub mod account;
pub mod admin;
pub mod announcement;
pub mod auth;
pub mod education;
pub mod health;
pub mod metrics;
pub mod portfolio;
pub mod profile;
pub mod template;
pub mod work;

use crate::domain::{check_attachment, Principal};
use crate::error::{AppError, Result};
use crate::state::HasServices;
use axum::extract::Multipart;
use serde::{Deserialize, Serialize};

/// Success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Message response (for delete, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Optional owner selection on listing endpoints. Administrators may read
/// another user's records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Allow the record owner, otherwise require the caller to be an
/// administrator.
pub(crate) async fn require_owner_or_admin<S: HasServices>(
    state: &S,
    principal: &Principal,
    owner_uid: &str,
) -> Result<()> {
    if principal.uid == owner_uid {
        return Ok(());
    }
    if state
        .role_resolver()
        .classify(Some(principal))
        .await
        .is_administrator()
    {
        tracing::info!(uid = %principal.uid, owner = %owner_uid, "Administrator acting on another user's record");
        return Ok(());
    }
    Err(AppError::Forbidden(
        "Only the owner or an administrator may do this".to_string(),
    ))
}

/// Resolve whose records a listing reads
pub(crate) async fn resolve_owner<S: HasServices>(
    state: &S,
    principal: &Principal,
    query: OwnerQuery,
) -> Result<String> {
    match query.user_id {
        Some(owner) if owner != principal.uid => {
            require_owner_or_admin(state, principal, &owner).await?;
            Ok(owner)
        }
        _ => Ok(principal.uid.clone()),
    }
}

/// A file received through a multipart form
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Read the `file` field of a multipart form and check it against the
/// attachment policy
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?
            .to_vec();

        check_attachment(&content_type, bytes.len() as u64)?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::BadRequest("Missing 'file' field".to_string()))
}
