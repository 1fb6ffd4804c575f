use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::forum::{ForumPost, PostFilter};

#[async_trait]
pub trait ForumRepository: Send + Sync {
    async fn insert(&self, post: &ForumPost) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ForumPost>>;
    /// Writes the whole post back, embedded comments and polls included.
    async fn save(&self, post: &ForumPost) -> anyhow::Result<()>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Newest first; returns the page and the total number of matches.
    async fn list(
        &self,
        filter: &PostFilter,
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<(Vec<ForumPost>, i64)>;
}
