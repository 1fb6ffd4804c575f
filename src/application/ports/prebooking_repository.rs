use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::prebooking::{NewPrebooking, Prebooking, PrebookingStatus};

#[async_trait]
pub trait PrebookingRepository: Send + Sync {
    async fn create(&self, prebooking: &NewPrebooking) -> anyhow::Result<Prebooking>;
    async fn list_all(&self) -> anyhow::Result<Vec<Prebooking>>;
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Prebooking>>;
    async fn list_by_mess(&self, mess_id: Uuid) -> anyhow::Result<Vec<Prebooking>>;
    async fn update_status(
        &self,
        id: Uuid,
        status: PrebookingStatus,
    ) -> anyhow::Result<Option<Prebooking>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
