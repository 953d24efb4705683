//! Student profile domain model

use super::common::split_list;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Role label shown on a profile and edited by administrators.
///
/// This label is informational; administrator access is decided by the
/// token claim and the administrators registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    User,
    Admin,
}

crate::string_enum!(ProfileRole { User => "user", Admin => "admin" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
}

crate::string_enum!(Visibility { Private => "private", Public => "public" });

/// Profile entity, keyed by the owner's principal identifier
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub school: String,
    pub faculty_target: String,
    pub year: String,
    pub phone: String,
    pub bio: String,
    #[sqlx(json)]
    pub skills: Vec<String>,
    pub photo_url: Option<String>,
    pub portfolio_title: Option<String>,
    pub portfolio_description: Option<String>,
    pub role: ProfileRole,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Seed profile created on first access
    pub fn seed(uid: &str, email: &str) -> Self {
        let now = Utc::now();
        Self {
            uid: uid.to_string(),
            email: email.to_string(),
            display_name: String::new(),
            school: String::new(),
            faculty_target: String::new(),
            year: String::new(),
            phone: String::new(),
            bio: String::new(),
            skills: vec![],
            photo_url: None,
            portfolio_title: None,
            portfolio_description: None,
            role: ProfileRole::User,
            visibility: Visibility::Private,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Accept skills either as a JSON list or as comma-separated text
fn deserialize_skills<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SkillsInput {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<SkillsInput>::deserialize(deserializer)? {
        Some(SkillsInput::List(items)) => Some(
            items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Some(SkillsInput::Text(text)) => Some(split_list(&text)),
        None => None,
    })
}

/// Input for updating a profile; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(max = 255))]
    pub display_name: Option<String>,
    #[validate(length(max = 255))]
    pub school: Option<String>,
    #[validate(length(max = 255))]
    pub faculty_target: Option<String>,
    #[validate(length(max = 64))]
    pub year: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: Option<Vec<String>>,
    #[validate(length(max = 255))]
    pub portfolio_title: Option<String>,
    #[validate(length(max = 1000))]
    pub portfolio_description: Option<String>,
    pub visibility: Option<Visibility>,
}

impl UpdateProfileInput {
    pub fn apply(self, profile: &mut Profile) {
        if let Some(v) = self.display_name {
            profile.display_name = v;
        }
        if let Some(v) = self.school {
            profile.school = v;
        }
        if let Some(v) = self.faculty_target {
            profile.faculty_target = v;
        }
        if let Some(v) = self.year {
            profile.year = v;
        }
        if let Some(v) = self.phone {
            profile.phone = v;
        }
        if let Some(v) = self.bio {
            profile.bio = v;
        }
        if let Some(v) = self.skills {
            profile.skills = v;
        }
        if let Some(v) = self.portfolio_title {
            profile.portfolio_title = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = self.portfolio_description {
            profile.portfolio_description = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = self.visibility {
            profile.visibility = v;
        }
        profile.updated_at = Utc::now();
    }
}
