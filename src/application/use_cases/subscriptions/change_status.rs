use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::plan_repository::PlanRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::domain::subscriptions::{SubscriptionStatus, UserSubscription};

pub struct ChangeSubscriptionStatus<'a, P, S>
where
    P: PlanRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
{
    pub plans: &'a P,
    pub subscriptions: &'a S,
}

impl<'a, P, S> ChangeSubscriptionStatus<'a, P, S>
where
    P: PlanRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
{
    /// `owner_id`, when given, must be the owner of the subscribed plan.
    pub async fn execute(
        &self,
        subscription_id: Uuid,
        status: Option<SubscriptionStatus>,
        owner_id: Option<Uuid>,
    ) -> ServiceResult<UserSubscription> {
        if status == Some(SubscriptionStatus::PlanRemoved) {
            return Err(ServiceError::invalid("Invalid subscription status"));
        }
        let mut subscription = self
            .subscriptions
            .find_by_id(subscription_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Subscription"))?;
        let plan = self
            .plans
            .find_by_id(subscription.plan_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Plan"))?;
        if owner_id.is_some_and(|o| o != plan.owner_id) {
            return Err(ServiceError::forbidden(
                "Not authorized to update this subscription",
            ));
        }
        let now = Utc::now();
        if let Some(status) = status {
            subscription.transition(status, plan.duration, now);
            info!(subscription_id = %subscription.id, status = %status, "subscription_status_changed");
        }
        subscription.updated_at = now;
        Ok(self.subscriptions.save(&subscription).await?)
    }
}
