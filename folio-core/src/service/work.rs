//! Work business logic

use crate::domain::{check_attachment, RecordId, Work, WorkFilter, WorkInput};
use crate::error::{AppError, Result};
use crate::repository::WorkRepository;
use std::sync::Arc;
use validator::Validate;

pub struct WorkService<R: WorkRepository> {
    repo: Arc<R>,
}

impl<R: WorkRepository> WorkService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The principal's works matching `filter`, most recent first
    pub async fn list(&self, user_id: &str, filter: &WorkFilter) -> Result<Vec<Work>> {
        let works = self.repo.list_by_user(user_id).await?;
        Ok(works.into_iter().filter(|w| filter.matches(w)).collect())
    }

    pub async fn get(&self, id: RecordId) -> Result<Work> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))
    }

    pub async fn create(&self, user_id: &str, input: WorkInput) -> Result<Work> {
        validate_input(&input)?;

        let work = Work::new(user_id, input);
        self.repo.create(&work).await?;
        Ok(work)
    }

    pub async fn update(&self, mut existing: Work, input: WorkInput) -> Result<Work> {
        validate_input(&input)?;

        existing.apply(input);
        self.repo.update(&existing).await?;
        Ok(existing)
    }

    pub async fn delete(&self, existing: &Work) -> Result<()> {
        self.repo.delete(existing.id).await
    }
}

fn validate_input(input: &WorkInput) -> Result<()> {
    input.validate()?;
    if let Some(attachment) = &input.attachment {
        check_attachment(&attachment.content_type, attachment.size)?;
    }
    Ok(())
}
