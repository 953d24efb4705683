//! Education business logic
//!
//! Ownership checks happen at the API layer; this service trusts the caller
//! to pass records it may write.

use crate::domain::{Education, EducationInput, RecordId};
use crate::error::{AppError, Result};
use crate::repository::EducationRepository;
use std::sync::Arc;
use validator::Validate;

pub struct EducationService<R: EducationRepository> {
    repo: Arc<R>,
}

impl<R: EducationRepository> EducationService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Education>> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn get(&self, id: RecordId) -> Result<Education> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Education record {} not found", id)))
    }

    pub async fn create(&self, user_id: &str, input: EducationInput) -> Result<Education> {
        input.validate()?;

        let education = Education::new(user_id, input);
        self.repo.create(&education).await?;
        Ok(education)
    }

    pub async fn update(&self, mut existing: Education, input: EducationInput) -> Result<Education> {
        input.validate()?;

        existing.apply(input);
        self.repo.update(&existing).await?;
        Ok(existing)
    }

    pub async fn delete(&self, existing: &Education) -> Result<()> {
        self.repo.delete(existing.id).await
    }
}
