use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::mess::Mess;
use crate::domain::users::{NewUser, User};

#[derive(Debug, Clone)]
pub enum ProfileUpdate {
    Updated(User),
    Missing,
    /// Another account already holds the username or email.
    Taken,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns `None` when the username or email is already taken.
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<Option<User>>;
    /// Stores a mess owner and their default mess together; neither is kept
    /// when the other fails. Returns `None` when the username or email is taken.
    async fn create_owner(
        &self,
        user: &NewUser,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<(User, Mess)>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_by_user_number(&self, user_number: i64) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn update_profile(
        &self,
        id: Uuid,
        username: &str,
        email: &str,
    ) -> anyhow::Result<ProfileUpdate>;
    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool>;
}
