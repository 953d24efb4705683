//! Local identity provider credential store

use crate::domain::{Credential, TokenClaims};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn create(&self, credential: &Credential) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>>;
    async fn find_by_uid(&self, uid: &str) -> Result<Option<Credential>>;
    /// Replace the custom claims embedded in future tokens
    async fn set_custom_claims(&self, uid: &str, claims: &TokenClaims) -> Result<()>;
    /// Replace the sign-in email and password hash
    async fn update_login(&self, uid: &str, email: &str, password_hash: &str) -> Result<()>;
}

pub struct CredentialRepositoryImpl {
    pool: MySqlPool,
}

impl CredentialRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for CredentialRepositoryImpl {
    async fn create(&self, credential: &Credential) -> Result<()> {
        let claims_json = serde_json::to_string(&credential.custom_claims)
            .map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO credentials (uid, email, password_hash, custom_claims, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&credential.uid)
        .bind(&credential.email)
        .bind(&credential.password_hash)
        .bind(&claims_json)
        .bind(credential.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT uid, email, password_hash, custom_claims, created_at
            FROM credentials
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT uid, email, password_hash, custom_claims, created_at
            FROM credentials
            WHERE uid = ?
            "#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn set_custom_claims(&self, uid: &str, claims: &TokenClaims) -> Result<()> {
        let claims_json =
            serde_json::to_string(claims).map_err(|e| AppError::Internal(e.into()))?;

        let result = sqlx::query("UPDATE credentials SET custom_claims = ? WHERE uid = ?")
            .bind(&claims_json)
            .bind(uid)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Principal {} not found", uid)));
        }

        Ok(())
    }

    async fn update_login(&self, uid: &str, email: &str, password_hash: &str) -> Result<()> {
        let result =
            sqlx::query("UPDATE credentials SET email = ?, password_hash = ? WHERE uid = ?")
                .bind(email)
                .bind(password_hash)
                .bind(uid)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Principal {} not found", uid)));
        }

        Ok(())
    }
}
