use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::User;

pub struct GetUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetUser<'a, R> {
    pub async fn execute(&self, id: Uuid) -> ServiceResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))
    }

    /// All-digit keys name the numeric account id; anything else must be a UUID.
    pub async fn by_key(&self, key: &str) -> ServiceResult<User> {
        let key = key.trim();
        let found = if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
            match key.parse::<i64>() {
                Ok(n) => self.repo.find_by_user_number(n).await?,
                Err(_) => None,
            }
        } else {
            match Uuid::parse_str(key) {
                Ok(id) => self.repo.find_by_id(id).await?,
                Err(_) => None,
            }
        };
        found.ok_or_else(|| ServiceError::not_found("User"))
    }
}
