//! Profile repository

use crate::domain::{Profile, ProfileRole};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, uid: &str) -> Result<Option<Profile>>;
    async fn list(&self) -> Result<Vec<Profile>>;
    async fn upsert(&self, profile: &Profile) -> Result<()>;
    async fn set_role(&self, uid: &str, role: ProfileRole) -> Result<()>;
}

pub struct ProfileRepositoryImpl {
    pool: MySqlPool,
}

impl ProfileRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = "uid, email, display_name, school, faculty_target, year, phone, bio, \
     skills, photo_url, portfolio_title, portfolio_description, role, visibility, created_at, updated_at";

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn find(&self, uid: &str) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE uid = ?",
            PROFILE_COLUMNS
        ))
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles ORDER BY created_at DESC",
            PROFILE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    async fn upsert(&self, profile: &Profile) -> Result<()> {
        let skills_json =
            serde_json::to_string(&profile.skills).map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO profiles (uid, email, display_name, school, faculty_target, year, phone, bio,
                                  skills, photo_url, portfolio_title, portfolio_description,
                                  role, visibility, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                email = VALUES(email),
                display_name = VALUES(display_name),
                school = VALUES(school),
                faculty_target = VALUES(faculty_target),
                year = VALUES(year),
                phone = VALUES(phone),
                bio = VALUES(bio),
                skills = VALUES(skills),
                photo_url = VALUES(photo_url),
                portfolio_title = VALUES(portfolio_title),
                portfolio_description = VALUES(portfolio_description),
                role = VALUES(role),
                visibility = VALUES(visibility),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(&profile.uid)
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.school)
        .bind(&profile.faculty_target)
        .bind(&profile.year)
        .bind(&profile.phone)
        .bind(&profile.bio)
        .bind(&skills_json)
        .bind(&profile.photo_url)
        .bind(&profile.portfolio_title)
        .bind(&profile.portfolio_description)
        .bind(profile.role)
        .bind(profile.visibility)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_role(&self, uid: &str, role: ProfileRole) -> Result<()> {
        let result = sqlx::query("UPDATE profiles SET role = ?, updated_at = NOW() WHERE uid = ?")
            .bind(role)
            .bind(uid)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Profile {} not found", uid)));
        }

        Ok(())
    }
}
