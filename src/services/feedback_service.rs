use crate::models::feedback::{Feedback, FeedbackRequest};
use crate::repositories::feedback_repository::FeedbackRepository;
use crate::repositories::user_repository::RepositoryError;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum FeedbackServiceError {
    #[error("Feedback not found")]
    NotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct FeedbackService {
    repository: Arc<dyn FeedbackRepository>,
}

impl FeedbackService {
    pub fn new(repository: Arc<dyn FeedbackRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        username: &str,
        request: FeedbackRequest,
    ) -> Result<Feedback, FeedbackServiceError> {
        let feedback = self.repository.create(username, &request).await?;
        info!(id = feedback.id, %username, "Created feedback");
        Ok(feedback)
    }

    pub async fn get(&self, id: i64) -> Result<Feedback, FeedbackServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(FeedbackServiceError::NotFound)
    }

    pub async fn list_for_user(&self, username: &str) -> Result<Vec<Feedback>, FeedbackServiceError> {
        Ok(self.repository.list_by_username(username).await?)
    }

    pub async fn update(
        &self,
        id: i64,
        request: FeedbackRequest,
    ) -> Result<Feedback, FeedbackServiceError> {
        if !self.repository.update(id, &request).await? {
            return Err(FeedbackServiceError::NotFound);
        }

        info!(id, "Updated feedback");
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), FeedbackServiceError> {
        if !self.repository.delete(id).await? {
            return Err(FeedbackServiceError::NotFound);
        }

        info!(id, "Deleted feedback");
        Ok(())
    }
}
