//! Announcement business logic

use crate::domain::{Announcement, AnnouncementInput, RecordId};
use crate::error::{AppError, Result};
use crate::repository::AnnouncementRepository;
use std::sync::Arc;
use validator::Validate;

pub struct AnnouncementService<R: AnnouncementRepository> {
    repo: Arc<R>,
}

impl<R: AnnouncementRepository> AnnouncementService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<Announcement>> {
        self.repo.list().await
    }

    pub async fn publish(&self, author_uid: &str, input: AnnouncementInput) -> Result<Announcement> {
        input.validate()?;

        let announcement = Announcement::new(author_uid, input);
        self.repo.create(&announcement).await?;
        tracing::info!(id = %announcement.id, author = %author_uid, "Announcement published");
        Ok(announcement)
    }

    pub async fn delete(&self, id: RecordId) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(format!("Announcement {} not found", id)));
        }
        Ok(())
    }
}
