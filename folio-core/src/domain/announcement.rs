//! Announcement domain model

use super::common::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A notice published by an administrator to every signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub author_uid: String,
    pub created_at: DateTime<Utc>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnnouncementInput {
    #[validate(length(max = 255), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 5000), custom(function = "validate_not_blank"))]
    pub content: String,
}

impl Announcement {
    pub fn new(author_uid: &str, input: AnnouncementInput) -> Self {
        Self {
            id: RecordId::new_v4(),
            title: input.title.trim().to_string(),
            content: input.content.trim().to_string(),
            author_uid: author_uid.to_string(),
            created_at: Utc::now(),
        }
    }
}
