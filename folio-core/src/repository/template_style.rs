//! Template style repository

use crate::domain::TemplateStyle;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateStyleRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<TemplateStyle>>;
    /// Published styles, most recently updated first
    async fn list_published(&self) -> Result<Vec<TemplateStyle>>;
    async fn find(&self, id: &str) -> Result<Option<TemplateStyle>>;
    async fn create(&self, style: &TemplateStyle) -> Result<()>;
    async fn update(&self, style: &TemplateStyle) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

pub struct TemplateStyleRepositoryImpl {
    pool: MySqlPool,
}

impl TemplateStyleRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStyleRepository for TemplateStyleRepositoryImpl {
    async fn list_all(&self) -> Result<Vec<TemplateStyle>> {
        let rows = sqlx::query_as::<_, TemplateStyle>(
            r#"
            SELECT id, name, primary_color, font, radius, chip, is_published, created_at, updated_at
            FROM template_styles
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_published(&self) -> Result<Vec<TemplateStyle>> {
        let rows = sqlx::query_as::<_, TemplateStyle>(
            r#"
            SELECT id, name, primary_color, font, radius, chip, is_published, created_at, updated_at
            FROM template_styles
            WHERE is_published = TRUE
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find(&self, id: &str) -> Result<Option<TemplateStyle>> {
        let row = sqlx::query_as::<_, TemplateStyle>(
            r#"
            SELECT id, name, primary_color, font, radius, chip, is_published, created_at, updated_at
            FROM template_styles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, style: &TemplateStyle) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO template_styles (id, name, primary_color, font, radius, chip, is_published,
                                         created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&style.id)
        .bind(&style.name)
        .bind(&style.primary_color)
        .bind(&style.font)
        .bind(&style.radius)
        .bind(&style.chip)
        .bind(style.is_published)
        .bind(style.created_at)
        .bind(style.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, style: &TemplateStyle) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE template_styles
            SET name = ?, primary_color = ?, font = ?, radius = ?, chip = ?, is_published = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&style.name)
        .bind(&style.primary_color)
        .bind(&style.font)
        .bind(&style.radius)
        .bind(&style.chip)
        .bind(style.is_published)
        .bind(style.updated_at)
        .bind(&style.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM template_styles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
