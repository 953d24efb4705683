//! Templates and template styles

use crate::domain::{
    default_templates, Template, TemplateInput, TemplateStyle, TemplateStyleInput,
};
use crate::error::{AppError, Result};
use crate::repository::{TemplateRepository, TemplateStyleRepository};
use std::sync::Arc;
use validator::Validate;

pub struct TemplateService<T: TemplateRepository, S: TemplateStyleRepository> {
    templates: Arc<T>,
    styles: Arc<S>,
}

impl<T: TemplateRepository, S: TemplateStyleRepository> TemplateService<T, S> {
    pub fn new(templates: Arc<T>, styles: Arc<S>) -> Self {
        Self { templates, styles }
    }

    // ========================================================================
    // Student-facing listings
    // ========================================================================

    pub async fn list_active(&self) -> Result<Vec<Template>> {
        self.templates.list_active().await
    }

    /// Published styles. A failed read degrades to the built-in default
    /// style instead of an error.
    pub async fn list_published_styles(&self) -> Vec<TemplateStyle> {
        match self.styles.list_published().await {
            Ok(styles) => styles,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read template styles, using default");
                vec![TemplateStyle::builtin_default()]
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Template> {
        self.templates
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Template {} not found", id)))
    }

    /// The requested style, or the built-in default when none is requested,
    /// the id is unknown or the read fails
    pub async fn resolve_style(&self, id: Option<&str>) -> TemplateStyle {
        let Some(id) = id else {
            return TemplateStyle::builtin_default();
        };
        match self.styles.find(id).await {
            Ok(Some(style)) => style,
            Ok(None) => TemplateStyle::builtin_default(),
            Err(e) => {
                tracing::warn!(style_id = %id, error = %e, "Failed to read template style");
                TemplateStyle::builtin_default()
            }
        }
    }

    // ========================================================================
    // Administration
    // ========================================================================

    pub async fn list_all(&self) -> Result<Vec<Template>> {
        self.templates.list_all().await
    }

    pub async fn create(&self, input: TemplateInput, actor: &str) -> Result<Template> {
        input.validate()?;

        let template = Template::new(uuid::Uuid::new_v4().to_string(), input, actor);
        self.templates.create(&template).await?;
        Ok(template)
    }

    pub async fn update(&self, id: &str, input: TemplateInput, actor: &str) -> Result<Template> {
        input.validate()?;

        let mut template = self.get(id).await?;
        template.apply(input, actor);
        self.templates.update(&template).await?;
        Ok(template)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.get(id).await?;
        self.templates.delete(id).await
    }

    /// Install the built-in templates that are missing. Returns how many
    /// were created; running it again creates none.
    pub async fn initialize_defaults(&self) -> Result<usize> {
        let mut created = 0;
        for template in default_templates() {
            if self.templates.find(&template.id).await?.is_some() {
                continue;
            }
            self.templates.create(&template).await?;
            created += 1;
        }

        tracing::info!(created, "Default templates initialized");
        Ok(created)
    }

    pub async fn list_all_styles(&self) -> Result<Vec<TemplateStyle>> {
        self.styles.list_all().await
    }

    pub async fn create_style(&self, input: TemplateStyleInput) -> Result<TemplateStyle> {
        input.validate()?;

        let style = TemplateStyle::new(uuid::Uuid::new_v4().to_string(), input);
        self.styles.create(&style).await?;
        Ok(style)
    }

    pub async fn update_style(&self, id: &str, input: TemplateStyleInput) -> Result<TemplateStyle> {
        input.validate()?;

        let mut style = self
            .styles
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Template style {} not found", id)))?;
        style.apply(input);
        self.styles.update(&style).await?;
        Ok(style)
    }

    pub async fn delete_style(&self, id: &str) -> Result<()> {
        if self.styles.find(id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Template style {} not found",
                id
            )));
        }
        self.styles.delete(id).await
    }
}
