//! Administrators registry

use crate::domain::AdminRecord;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Point lookup by principal identifier
    async fn find(&self, uid: &str) -> Result<Option<AdminRecord>>;
    async fn list(&self) -> Result<Vec<AdminRecord>>;
    /// Insert the record, refreshing `username` and `updated_at` if it exists
    async fn upsert(&self, record: &AdminRecord) -> Result<()>;
    /// Returns false when no record existed
    async fn delete(&self, uid: &str) -> Result<bool>;
}

pub struct AdminRepositoryImpl {
    pool: MySqlPool,
}

impl AdminRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for AdminRepositoryImpl {
    async fn find(&self, uid: &str) -> Result<Option<AdminRecord>> {
        let record = sqlx::query_as::<_, AdminRecord>(
            "SELECT uid, username, created_at, updated_at FROM admins WHERE uid = ?",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<AdminRecord>> {
        let records = sqlx::query_as::<_, AdminRecord>(
            "SELECT uid, username, created_at, updated_at FROM admins ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn upsert(&self, record: &AdminRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (uid, username, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                username = VALUES(username),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(&record.uid)
        .bind(&record.username)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, uid: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM admins WHERE uid = ?")
            .bind(uid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
