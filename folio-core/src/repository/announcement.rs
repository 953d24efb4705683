//! Announcement repository

use crate::domain::{Announcement, RecordId};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// All announcements, newest first
    async fn list(&self) -> Result<Vec<Announcement>>;
    async fn create(&self, announcement: &Announcement) -> Result<()>;
    /// Returns false when no announcement had this id
    async fn delete(&self, id: RecordId) -> Result<bool>;
}

pub struct AnnouncementRepositoryImpl {
    pool: MySqlPool,
}

impl AnnouncementRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementRepository for AnnouncementRepositoryImpl {
    async fn list(&self) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, Announcement>(
            r#"
            SELECT id, title, content, author_uid, created_at
            FROM announcements
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, announcement: &Announcement) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO announcements (id, title, content, author_uid, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(announcement.id)
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(&announcement.author_uid)
        .bind(announcement.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
