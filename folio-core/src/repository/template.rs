//! Template repository

use crate::domain::Template;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// All templates, most recently updated first
    async fn list_all(&self) -> Result<Vec<Template>>;
    /// Templates with `is_active` set, most recently updated first
    async fn list_active(&self) -> Result<Vec<Template>>;
    async fn find(&self, id: &str) -> Result<Option<Template>>;
    async fn create(&self, template: &Template) -> Result<()>;
    async fn update(&self, template: &Template) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

pub struct TemplateRepositoryImpl {
    pool: MySqlPool,
}

impl TemplateRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const TEMPLATE_COLUMNS: &str = "id, name, kind, description, color, sections, is_published, \
     is_active, created_by, updated_by, created_at, updated_at";

#[async_trait]
impl TemplateRepository for TemplateRepositoryImpl {
    async fn list_all(&self) -> Result<Vec<Template>> {
        let rows = sqlx::query_as::<_, Template>(&format!(
            "SELECT {} FROM templates ORDER BY updated_at DESC",
            TEMPLATE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_active(&self) -> Result<Vec<Template>> {
        let rows = sqlx::query_as::<_, Template>(&format!(
            "SELECT {} FROM templates WHERE is_active = TRUE ORDER BY updated_at DESC",
            TEMPLATE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find(&self, id: &str) -> Result<Option<Template>> {
        let row = sqlx::query_as::<_, Template>(&format!(
            "SELECT {} FROM templates WHERE id = ?",
            TEMPLATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, template: &Template) -> Result<()> {
        let sections_json = serde_json::to_string(&template.sections)
            .map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO templates (id, name, kind, description, color, sections, is_published,
                                   is_active, created_by, updated_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&template.id)
        .bind(&template.name)
        .bind(template.kind)
        .bind(&template.description)
        .bind(&template.color)
        .bind(&sections_json)
        .bind(template.is_published)
        .bind(template.is_active)
        .bind(&template.created_by)
        .bind(&template.updated_by)
        .bind(template.created_at)
        .bind(template.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, template: &Template) -> Result<()> {
        let sections_json = serde_json::to_string(&template.sections)
            .map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            UPDATE templates
            SET name = ?, kind = ?, description = ?, color = ?, sections = ?, is_published = ?,
                is_active = ?, updated_by = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&template.name)
        .bind(template.kind)
        .bind(&template.description)
        .bind(&template.color)
        .bind(&sections_json)
        .bind(template.is_published)
        .bind(template.is_active)
        .bind(&template.updated_by)
        .bind(template.updated_at)
        .bind(&template.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
