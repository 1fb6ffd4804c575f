use uuid::Uuid;

use crate::application::dto::feedback::FeedbackEntryDto;
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::validation;
use crate::domain::feedback::{COMMENTS_MAX_LEN, NewFeedback};

pub struct SubmitFeedback<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FeedbackRepository + ?Sized,
{
    pub users: &'a U,
    pub feedback: &'a F,
}

impl<'a, U, F> SubmitFeedback<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FeedbackRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        comments: String,
        rating: i32,
    ) -> ServiceResult<FeedbackEntryDto> {
        validation::max_length("Comments", &comments, COMMENTS_MAX_LEN)?;
        if !(1..=5).contains(&rating) {
            return Err(ServiceError::invalid("Rating must be between 1 and 5"));
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;
        let feedback = self
            .feedback
            .create(&NewFeedback {
                user_id,
                comments,
                rating,
            })
            .await?;
        Ok(FeedbackEntryDto {
            feedback,
            username: user.username,
        })
    }
}
