use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::subscriptions::{NewPlan, SubscriptionPlan};

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, plan: &NewPlan) -> anyhow::Result<SubscriptionPlan>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<SubscriptionPlan>>;
    async fn save(&self, plan: &SubscriptionPlan) -> anyhow::Result<SubscriptionPlan>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn list_by_owner(&self, owner_id: Uuid, active_only: bool) -> anyhow::Result<Vec<SubscriptionPlan>>;
    /// Active plans of every owner, newest first.
    async fn list_active(&self) -> anyhow::Result<Vec<SubscriptionPlan>>;
}
