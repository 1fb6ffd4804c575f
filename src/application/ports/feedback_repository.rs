use async_trait::async_trait;

use crate::domain::feedback::{Feedback, NewFeedback};

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create(&self, feedback: &NewFeedback) -> anyhow::Result<Feedback>;
    /// Newest first.
    async fn list(&self) -> anyhow::Result<Vec<Feedback>>;
}
