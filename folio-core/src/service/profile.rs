//! Profile business logic

use crate::domain::{Principal, Profile, UpdateProfileInput};
use crate::error::Result;
use crate::repository::ProfileRepository;
use std::sync::Arc;
use validator::Validate;

pub struct ProfileService<R: ProfileRepository> {
    repo: Arc<R>,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Return the principal's profile, seeding a private `user` profile on
    /// first access
    pub async fn get_or_seed(&self, principal: &Principal) -> Result<Profile> {
        if let Some(profile) = self.repo.find(&principal.uid).await? {
            return Ok(profile);
        }

        let profile = Profile::seed(&principal.uid, &principal.email);
        self.repo.upsert(&profile).await?;
        tracing::info!(uid = %principal.uid, "Seeded profile");
        Ok(profile)
    }

    pub async fn update(&self, principal: &Principal, input: UpdateProfileInput) -> Result<Profile> {
        input.validate()?;

        let mut profile = self.get_or_seed(principal).await?;
        input.apply(&mut profile);
        self.repo.upsert(&profile).await?;
        Ok(profile)
    }

    pub async fn set_photo(&self, principal: &Principal, url: String) -> Result<Profile> {
        let mut profile = self.get_or_seed(principal).await?;
        profile.photo_url = Some(url);
        profile.updated_at = chrono::Utc::now();
        self.repo.upsert(&profile).await?;
        Ok(profile)
    }
}
