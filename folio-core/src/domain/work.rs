//! Work (portfolio piece) domain model

use super::common::{split_list, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Maximum size of a work attachment (20 MiB)
pub const MAX_ATTACHMENT_BYTES: u64 = 20 * 1024 * 1024;

/// Content types accepted for work attachments
pub const ALLOWED_ATTACHMENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "video/mp4",
    "video/webm",
    "application/pdf",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkCategory {
    Design,
    WebDevelopment,
    AppDevelopment,
    Photography,
    Video,
    Art,
    Writing,
    Research,
    Presentation,
    #[default]
    Other,
}

crate::string_enum!(WorkCategory {
    Design => "design",
    WebDevelopment => "web_development",
    AppDevelopment => "app_development",
    Photography => "photography",
    Video => "video",
    Art => "art",
    Writing => "writing",
    Research => "research",
    Presentation => "presentation",
    Other => "other",
});

/// Why an attachment was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentRejection {
    #[error("file exceeds the {max} byte limit ({size} bytes)")]
    TooLarge { size: u64, max: u64 },
    #[error("content type '{0}' is not allowed")]
    UnsupportedType(String),
    #[error("file is empty")]
    Empty,
}

/// Check an attachment against the size and content-type policy
pub fn check_attachment(content_type: &str, size: u64) -> Result<(), AttachmentRejection> {
    if size == 0 {
        return Err(AttachmentRejection::Empty);
    }
    if size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentRejection::TooLarge {
            size,
            max: MAX_ATTACHMENT_BYTES,
        });
    }
    let normalized = content_type.trim().to_ascii_lowercase();
    if !ALLOWED_ATTACHMENT_TYPES.contains(&normalized.as_str()) {
        return Err(AttachmentRejection::UnsupportedType(content_type.to_string()));
    }
    Ok(())
}

/// A work entry owned by a single principal
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Work {
    pub id: RecordId,
    pub user_id: String,
    pub title: String,
    pub category: WorkCategory,
    pub year: String,
    pub description: String,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<u64>,
    pub link: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagsInput {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<TagsInput>::deserialize(deserializer)? {
        Some(TagsInput::List(items)) => split_list(&items.join(",")),
        Some(TagsInput::Text(text)) => split_list(&text),
        None => vec![],
    })
}

/// Attached file metadata as returned by the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    pub content_type: String,
    pub size: u64,
}

/// Input for creating or replacing a work entry
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub category: Option<WorkCategory>,
    #[serde(default)]
    #[validate(length(max = 16))]
    pub year: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attachment: Option<Attachment>,
    #[serde(default)]
    #[validate(url)]
    pub link: Option<String>,
}

impl Work {
    pub fn new(user_id: &str, input: WorkInput) -> Self {
        let now = Utc::now();
        let mut work = Self {
            id: RecordId::new_v4(),
            user_id: user_id.to_string(),
            title: String::new(),
            category: WorkCategory::Other,
            year: String::new(),
            description: String::new(),
            tags: vec![],
            file_path: None,
            file_type: None,
            file_size: None,
            link: None,
            uploaded_at: now,
            updated_at: now,
        };
        work.apply(input);
        work
    }

    /// Replace the editable fields. An input without an attachment keeps the
    /// existing file.
    pub fn apply(&mut self, input: WorkInput) {
        self.title = input.title.trim().to_string();
        self.category = input.category.unwrap_or_default();
        self.year = input.year.trim().to_string();
        self.description = input.description.trim().to_string();
        self.tags = input.tags;
        if let Some(attachment) = input.attachment {
            self.file_path = Some(attachment.url);
            self.file_type = Some(attachment.content_type);
            self.file_size = Some(attachment.size);
        }
        self.link = input
            .link
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        self.updated_at = Utc::now();
    }
}

/// Filter applied to a principal's work list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkFilter {
    /// Case-insensitive substring over title, description and tags
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<WorkCategory>,
}

impl WorkFilter {
    pub fn matches(&self, work: &Work) -> bool {
        if let Some(category) = self.category {
            if work.category != category {
                return false;
            }
        }

        match self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            None => true,
            Some(q) => {
                let needle = q.to_lowercase();
                work.title.to_lowercase().contains(&needle)
                    || work.description.to_lowercase().contains(&needle)
                    || work.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            }
        }
    }
}
