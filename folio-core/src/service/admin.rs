//! Administrator enrollment, the administrators registry and user management

use crate::config::AdminEnrollmentConfig;
use crate::domain::{AdminRecord, Profile, ProfileRole};
use crate::error::{AppError, Result};
use crate::identity::IdentityProvider;
use crate::repository::{AdminRepository, ProfileRepository};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterAdminInput {
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrantAdminInput {
    pub uid: String,
    #[serde(default)]
    pub username: Option<String>,
}

pub struct AdminService<P, A, R>
where
    P: IdentityProvider,
    A: AdminRepository,
    R: ProfileRepository,
{
    provider: Arc<P>,
    admins: Arc<A>,
    profiles: Arc<R>,
    enrollment: AdminEnrollmentConfig,
}

impl<P, A, R> AdminService<P, A, R>
where
    P: IdentityProvider,
    A: AdminRepository,
    R: ProfileRepository,
{
    pub fn new(
        provider: Arc<P>,
        admins: Arc<A>,
        profiles: Arc<R>,
        enrollment: AdminEnrollmentConfig,
    ) -> Self {
        Self {
            provider,
            admins,
            profiles,
            enrollment,
        }
    }

    /// Self-service administrator sign-up, restricted to allow-listed emails
    /// that present the enrollment secret as their password.
    pub async fn register_admin(&self, input: RegisterAdminInput) -> Result<AdminRecord> {
        input.validate()?;

        let Some(secret) = self.enrollment.enrollment_secret.as_deref() else {
            return Err(AppError::Forbidden(
                "Administrator enrollment is closed".to_string(),
            ));
        };
        if !self.enrollment.is_allowed_email(&input.email) {
            return Err(AppError::Forbidden(
                "This email is not allowed to register as an administrator".to_string(),
            ));
        }
        if input.password != input.password_confirm {
            return Err(AppError::BadRequest("Passwords do not match".to_string()));
        }
        if input.password != secret {
            return Err(AppError::Forbidden(
                "Invalid administrator enrollment password".to_string(),
            ));
        }

        let principal = self.provider.sign_up(&input.email, &input.password).await?;
        let record = self.write_record(&principal.uid, &principal.email).await?;

        tracing::info!(uid = %record.uid, "Administrator registered");
        Ok(record)
    }

    pub async fn list_registry(&self) -> Result<Vec<AdminRecord>> {
        self.admins.list().await
    }

    /// Add a principal to the administrators registry
    pub async fn grant(&self, input: GrantAdminInput) -> Result<AdminRecord> {
        let username = match input.username {
            Some(username) if !username.trim().is_empty() => username,
            _ => self
                .profiles
                .find(&input.uid)
                .await?
                .map(|p| p.email)
                .unwrap_or_else(|| input.uid.clone()),
        };

        let record = self.write_record(&input.uid, &username).await?;
        tracing::info!(uid = %record.uid, "Administrator record granted");
        Ok(record)
    }

    pub async fn revoke(&self, uid: &str) -> Result<()> {
        if !self.admins.delete(uid).await? {
            return Err(AppError::NotFound(format!(
                "No administrator record for {}",
                uid
            )));
        }
        tracing::info!(uid = %uid, "Administrator record revoked");
        Ok(())
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.profiles.list().await
    }

    /// Change the informational role label shown on a profile
    pub async fn set_role_label(&self, uid: &str, role: ProfileRole) -> Result<()> {
        self.profiles.set_role(uid, role).await
    }

    async fn write_record(&self, uid: &str, username: &str) -> Result<AdminRecord> {
        let now = Utc::now();
        let created_at = self
            .admins
            .find(uid)
            .await?
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        let record = AdminRecord {
            uid: uid.to_string(),
            username: username.to_string(),
            created_at,
            updated_at: now,
        };
        self.admins.upsert(&record).await?;
        Ok(record)
    }
}
