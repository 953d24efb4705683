//! Assembled portfolio document

use super::{Education, Profile, Template, TemplateStyle, Work};
use serde::Serialize;

pub const DEFAULT_PORTFOLIO_TITLE: &str = "My Portfolio";
pub const DEFAULT_PORTFOLIO_DESCRIPTION: &str = "A collection of my work and education";

/// Everything a template needs to render one student's portfolio
#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    pub title: String,
    pub description: String,
    pub profile: Profile,
    pub educations: Vec<Education>,
    pub works: Vec<Work>,
    pub skills: Vec<String>,
    pub template: Option<Template>,
    pub style: TemplateStyle,
}

impl Portfolio {
    pub fn assemble(
        profile: Profile,
        educations: Vec<Education>,
        works: Vec<Work>,
        template: Option<Template>,
        style: TemplateStyle,
    ) -> Self {
        let title = profile
            .portfolio_title
            .clone()
            .unwrap_or_else(|| DEFAULT_PORTFOLIO_TITLE.to_string());
        let description = profile
            .portfolio_description
            .clone()
            .unwrap_or_else(|| DEFAULT_PORTFOLIO_DESCRIPTION.to_string());
        let skills = profile.skills.clone();

        Self {
            title,
            description,
            profile,
            educations,
            works,
            skills,
            template,
            style,
        }
    }
}
