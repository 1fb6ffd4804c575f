use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::mess::{Mess, NewMess};

#[async_trait]
pub trait MessRepository: Send + Sync {
    async fn create(&self, mess: &NewMess) -> anyhow::Result<Mess>;
    async fn list(&self, limit: i64) -> anyhow::Result<Vec<Mess>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Mess>>;
    async fn find_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Option<Mess>>;
    /// Persists the editable profile fields; ratings are left untouched.
    async fn save(&self, mess: &Mess) -> anyhow::Result<Mess>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Returns false when the user already rated this mess.
    async fn add_rating(&self, mess_id: Uuid, user_id: Uuid, rating: i32) -> anyhow::Result<bool>;
}
