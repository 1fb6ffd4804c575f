use crate::domain::feedback::Feedback;

#[derive(Debug, Clone)]
pub struct FeedbackEntryDto {
    pub feedback: Feedback,
    /// "Unknown" once the author's account is gone.
    pub username: String,
}
