use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::menu::{Menu, NewMenu};

#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn create(&self, menu: &NewMenu) -> anyhow::Result<Menu>;
    async fn list_all(&self) -> anyhow::Result<Vec<Menu>>;
    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Menu>>;
    /// Case-insensitive substring match on the menu name.
    async fn search_by_owner(&self, owner_id: Uuid, query: &str) -> anyhow::Result<Vec<Menu>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Menu>>;
    async fn save(&self, menu: &Menu) -> anyhow::Result<Menu>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
