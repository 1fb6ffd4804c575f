use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::subscriptions::{NewSubscription, UserSubscription};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Returns `None` when the user already holds a subscription to the plan.
    async fn create(&self, subscription: &NewSubscription) -> anyhow::Result<Option<UserSubscription>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserSubscription>>;
    async fn exists_for(&self, user_id: Uuid, plan_id: Uuid) -> anyhow::Result<bool>;
    /// Newest first.
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<UserSubscription>>;
    /// Newest first.
    async fn list_by_plans(&self, plan_ids: &[Uuid]) -> anyhow::Result<Vec<UserSubscription>>;
    async fn save(&self, subscription: &UserSubscription) -> anyhow::Result<UserSubscription>;
    /// Marks every subscription of the plan as removed; returns how many changed.
    async fn mark_plan_removed(
        &self,
        plan_id: Uuid,
        reason: &str,
        at: DateTime<Utc>,
    ) -> anyhow::Result<u64>;
}
