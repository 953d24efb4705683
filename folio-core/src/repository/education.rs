//! Education repository

use crate::domain::{Education, RecordId};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EducationRepository: Send + Sync {
    /// Entries owned by `user_id`, newest first
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Education>>;
    async fn find(&self, id: RecordId) -> Result<Option<Education>>;
    async fn create(&self, education: &Education) -> Result<()>;
    async fn update(&self, education: &Education) -> Result<()>;
    async fn delete(&self, id: RecordId) -> Result<()>;
}

pub struct EducationRepositoryImpl {
    pool: MySqlPool,
}

impl EducationRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EducationRepository for EducationRepositoryImpl {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Education>> {
        let rows = sqlx::query_as::<_, Education>(
            r#"
            SELECT id, user_id, degree, gpa, period, created_at, updated_at
            FROM education
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find(&self, id: RecordId) -> Result<Option<Education>> {
        let row = sqlx::query_as::<_, Education>(
            r#"
            SELECT id, user_id, degree, gpa, period, created_at, updated_at
            FROM education
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, education: &Education) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO education (id, user_id, degree, gpa, period, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(education.id)
        .bind(&education.user_id)
        .bind(&education.degree)
        .bind(education.gpa)
        .bind(&education.period)
        .bind(education.created_at)
        .bind(education.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, education: &Education) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE education
            SET degree = ?, gpa = ?, period = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&education.degree)
        .bind(education.gpa)
        .bind(&education.period)
        .bind(education.updated_at)
        .bind(education.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<()> {
        sqlx::query("DELETE FROM education WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
