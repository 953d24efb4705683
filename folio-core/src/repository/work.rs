//! Work repository

use crate::domain::{RecordId, Work};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkRepository: Send + Sync {
    /// Entries owned by `user_id`, most recently uploaded first
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Work>>;
    async fn find(&self, id: RecordId) -> Result<Option<Work>>;
    async fn create(&self, work: &Work) -> Result<()>;
    async fn update(&self, work: &Work) -> Result<()>;
    async fn delete(&self, id: RecordId) -> Result<()>;
}

pub struct WorkRepositoryImpl {
    pool: MySqlPool,
}

impl WorkRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkRepository for WorkRepositoryImpl {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Work>> {
        let rows = sqlx::query_as::<_, Work>(
            r#"
            SELECT id, user_id, title, category, year, description, tags, file_path, file_type,
                   file_size, link, uploaded_at, updated_at
            FROM work
            WHERE user_id = ?
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find(&self, id: RecordId) -> Result<Option<Work>> {
        let row = sqlx::query_as::<_, Work>(
            r#"
            SELECT id, user_id, title, category, year, description, tags, file_path, file_type,
                   file_size, link, uploaded_at, updated_at
            FROM work
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, work: &Work) -> Result<()> {
        let tags_json =
            serde_json::to_string(&work.tags).map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO work (id, user_id, title, category, year, description, tags, file_path,
                              file_type, file_size, link, uploaded_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(work.id)
        .bind(&work.user_id)
        .bind(&work.title)
        .bind(work.category)
        .bind(&work.year)
        .bind(&work.description)
        .bind(&tags_json)
        .bind(&work.file_path)
        .bind(&work.file_type)
        .bind(work.file_size)
        .bind(&work.link)
        .bind(work.uploaded_at)
        .bind(work.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, work: &Work) -> Result<()> {
        let tags_json =
            serde_json::to_string(&work.tags).map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            UPDATE work
            SET title = ?, category = ?, year = ?, description = ?, tags = ?, file_path = ?,
                file_type = ?, file_size = ?, link = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&work.title)
        .bind(work.category)
        .bind(&work.year)
        .bind(&work.description)
        .bind(&tags_json)
        .bind(&work.file_path)
        .bind(&work.file_type)
        .bind(work.file_size)
        .bind(&work.link)
        .bind(work.updated_at)
        .bind(work.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<()> {
        sqlx::query("DELETE FROM work WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
