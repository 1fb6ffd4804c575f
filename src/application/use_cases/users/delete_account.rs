use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;

pub struct DeleteAccount<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> DeleteAccount<'a, R> {
    pub async fn execute(&self, user_id: Uuid) -> ServiceResult<()> {
        if self.repo.delete_user(user_id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("User"))
        }
    }
}
