//! Portfolio templates and template styles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Layout a template renders with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Classic,
    Modern,
    Timeline,
    Gallery,
}

crate::string_enum!(TemplateKind {
    Classic => "classic",
    Modern => "modern",
    Timeline => "timeline",
    Gallery => "gallery",
});

/// Which portfolio sections a template shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSections {
    pub profile: bool,
    pub education: bool,
    pub works: bool,
    pub awards: bool,
    pub skills: bool,
}

impl Default for TemplateSections {
    fn default() -> Self {
        Self {
            profile: true,
            education: true,
            works: true,
            awards: true,
            skills: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub kind: TemplateKind,
    pub description: String,
    pub color: String,
    #[sqlx(json)]
    pub sections: TemplateSections,
    pub is_published: bool,
    pub is_active: bool,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TemplateInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub kind: TemplateKind,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[serde(default = "default_color")]
    #[validate(length(min = 4, max = 16))]
    pub color: String,
    #[serde(default)]
    pub sections: TemplateSections,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_color() -> String {
    "#2563eb".to_string()
}

fn default_true() -> bool {
    true
}

impl Template {
    pub fn new(id: String, input: TemplateInput, actor: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name.trim().to_string(),
            kind: input.kind,
            description: input.description,
            color: input.color,
            sections: input.sections,
            is_published: input.is_published,
            is_active: input.is_active,
            created_by: actor.to_string(),
            updated_by: actor.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: TemplateInput, actor: &str) {
        self.name = input.name.trim().to_string();
        self.kind = input.kind;
        self.description = input.description;
        self.color = input.color;
        self.sections = input.sections;
        self.is_published = input.is_published;
        self.is_active = input.is_active;
        self.updated_by = actor.to_string();
        self.updated_at = Utc::now();
    }
}

/// The built-in templates installed by template initialization, keyed by
/// their fixed identifiers.
pub fn default_templates() -> Vec<Template> {
    let seed = |id: &str, name: &str, kind, description: &str, color: &str| {
        Template::new(
            id.to_string(),
            TemplateInput {
                name: name.to_string(),
                kind,
                description: description.to_string(),
                color: color.to_string(),
                sections: TemplateSections::default(),
                is_published: true,
                is_active: true,
            },
            "system",
        )
    };

    vec![
        seed(
            "classic",
            "Classic CV",
            TemplateKind::Classic,
            "Simple layout suited to any field",
            "#2563eb",
        ),
        seed(
            "modern",
            "Modern Gradient",
            TemplateKind::Modern,
            "Colorful layout for creative work",
            "#16a34a",
        ),
        seed(
            "timeline",
            "Timeline",
            TemplateKind::Timeline,
            "Chronological layout highlighting experience",
            "#059669",
        ),
    ]
}

/// Visual theme applied on top of a template
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemplateStyle {
    pub id: String,
    pub name: String,
    pub primary_color: String,
    pub font: String,
    pub radius: String,
    pub chip: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TemplateStyle {
    pub const DEFAULT_ID: &'static str = "default";

    /// Fallback style served when published styles cannot be read
    pub fn builtin_default() -> Self {
        let now = Utc::now();
        Self {
            id: Self::DEFAULT_ID.to_string(),
            name: "Default theme".to_string(),
            primary_color: "#2563eb".to_string(),
            font: "inherit".to_string(),
            radius: "rounded-lg".to_string(),
            chip: "soft".to_string(),
            is_published: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn new(id: String, input: TemplateStyleInput) -> Self {
        let now = Utc::now();
        let mut style = Self {
            id,
            updated_at: now,
            created_at: now,
            ..Self::builtin_default()
        };
        style.apply(input);
        style.updated_at = now;
        style
    }

    pub fn apply(&mut self, input: TemplateStyleInput) {
        self.name = input.name.trim().to_string();
        self.primary_color = input.primary_color;
        self.font = input.font;
        self.radius = input.radius;
        self.chip = input.chip;
        self.is_published = input.is_published;
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TemplateStyleInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default = "default_color")]
    #[validate(length(min = 4, max = 16))]
    pub primary_color: String,
    #[serde(default = "default_font")]
    #[validate(length(max = 64))]
    pub font: String,
    #[serde(default = "default_radius")]
    #[validate(length(max = 32))]
    pub radius: String,
    #[serde(default = "default_chip")]
    #[validate(length(max = 32))]
    pub chip: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

fn default_font() -> String {
    "inherit".to_string()
}

fn default_radius() -> String {
    "rounded-lg".to_string()
}

fn default_chip() -> String {
    "soft".to_string()
}
