use std::collections::HashMap;

use crate::application::dto::feedback::FeedbackEntryDto;
use crate::application::errors::ServiceResult;
use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::ports::user_repository::UserRepository;

pub struct ListFeedback<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FeedbackRepository + ?Sized,
{
    pub users: &'a U,
    pub feedback: &'a F,
}

impl<'a, U, F> ListFeedback<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FeedbackRepository + ?Sized,
{
    pub async fn execute(&self) -> ServiceResult<Vec<FeedbackEntryDto>> {
        let rows = self.feedback.list().await?;
        let mut names: HashMap<uuid::Uuid, String> = HashMap::new();
        let mut out = Vec::with_capacity(rows.len());
        for feedback in rows {
            let username = match names.get(&feedback.user_id) {
                Some(n) => n.clone(),
                None => {
                    let n = self
                        .users
                        .find_by_id(feedback.user_id)
                        .await?
                        .map(|u| u.username)
                        .unwrap_or_else(|| "Unknown".to_string());
                    names.insert(feedback.user_id, n.clone());
                    n
                }
            };
            out.push(FeedbackEntryDto { feedback, username });
        }
        Ok(out)
    }
}
