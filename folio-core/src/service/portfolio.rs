//! Portfolio assembly for rendering and export

use super::TemplateService;
use crate::domain::{Portfolio, Principal, Profile};
use crate::error::{AppError, Result};
use crate::repository::{
    EducationRepository, ProfileRepository, TemplateRepository, TemplateStyleRepository,
    WorkRepository,
};
use serde::Deserialize;
use std::sync::Arc;

/// Template and style chosen for a rendering
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioSelection {
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

pub struct PortfolioService<P, E, W, T, S>
where
    P: ProfileRepository,
    E: EducationRepository,
    W: WorkRepository,
    T: TemplateRepository,
    S: TemplateStyleRepository,
{
    profiles: Arc<P>,
    educations: Arc<E>,
    works: Arc<W>,
    templates: Arc<TemplateService<T, S>>,
}

impl<P, E, W, T, S> PortfolioService<P, E, W, T, S>
where
    P: ProfileRepository,
    E: EducationRepository,
    W: WorkRepository,
    T: TemplateRepository,
    S: TemplateStyleRepository,
{
    pub fn new(
        profiles: Arc<P>,
        educations: Arc<E>,
        works: Arc<W>,
        templates: Arc<TemplateService<T, S>>,
    ) -> Self {
        Self {
            profiles,
            educations,
            works,
            templates,
        }
    }

    /// The caller's own portfolio. A principal without a stored profile gets
    /// an unsaved seed profile.
    pub async fn own(&self, principal: &Principal, selection: &PortfolioSelection) -> Result<Portfolio> {
        let profile = self
            .profiles
            .find(&principal.uid)
            .await?
            .unwrap_or_else(|| Profile::seed(&principal.uid, &principal.email));
        self.assemble(profile, selection).await
    }

    /// Another user's portfolio, for administrators
    pub async fn for_user(&self, uid: &str, selection: &PortfolioSelection) -> Result<Portfolio> {
        let profile = self
            .profiles
            .find(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", uid)))?;
        self.assemble(profile, selection).await
    }

    async fn assemble(&self, profile: Profile, selection: &PortfolioSelection) -> Result<Portfolio> {
        let educations = self.educations.list_by_user(&profile.uid).await?;
        let works = self.works.list_by_user(&profile.uid).await?;

        let template = match selection.template.as_deref() {
            Some(id) => Some(self.templates.get(id).await?),
            None => None,
        };
        let style = self.templates.resolve_style(selection.style.as_deref()).await;

        Ok(Portfolio::assemble(profile, educations, works, template, style))
    }
}
