use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::plan_repository::PlanRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::validation;
use crate::domain::subscriptions::{
    NewPlan, PLAN_DESCRIPTION_MAX_LEN, PLAN_NAME_MAX_LEN, PLAN_REMOVED_REASON, PlanPatch,
    SubscriptionPlan,
};

fn check_fields(name: Option<&str>, description: Option<&str>, price: Option<f64>) -> ServiceResult<()> {
    if let Some(name) = name {
        validation::length("Plan name", name.trim(), 1, PLAN_NAME_MAX_LEN)?;
    }
    if let Some(description) = description {
        validation::length("Description", description.trim(), 1, PLAN_DESCRIPTION_MAX_LEN)?;
    }
    if price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(ServiceError::invalid("Price cannot be negative"));
    }
    Ok(())
}

pub struct CreatePlan<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PlanRepository + ?Sized,
{
    pub users: &'a U,
    pub plans: &'a P,
}

impl<'a, U, P> CreatePlan<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PlanRepository + ?Sized,
{
    /// `plan.owner_id` is the requesting user, who must run a mess.
    pub async fn execute(&self, plan: NewPlan) -> ServiceResult<SubscriptionPlan> {
        let owner = self.users.find_by_id(plan.owner_id).await?;
        if !owner.is_some_and(|u| u.is_mess_owner()) {
            return Err(ServiceError::forbidden(
                "Only mess owners can create subscription plans",
            ));
        }
        check_fields(Some(&plan.plan_name), Some(&plan.description), Some(plan.price))?;
        Ok(self.plans.create(&plan).await?)
    }
}

pub struct UpdatePlan<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PlanRepository + ?Sized,
{
    pub users: &'a U,
    pub plans: &'a P,
}

impl<'a, U, P> UpdatePlan<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PlanRepository + ?Sized,
{
    pub async fn execute(
        &self,
        plan_id: Uuid,
        actor_id: Uuid,
        patch: PlanPatch,
    ) -> ServiceResult<SubscriptionPlan> {
        let mut plan = self
            .plans
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Plan"))?;
        let actor = self.users.find_by_id(actor_id).await?;
        if !actor.is_some_and(|u| u.is_mess_owner()) || plan.owner_id != actor_id {
            return Err(ServiceError::forbidden("You can only update your own plans"));
        }
        check_fields(
            patch.plan_name.as_deref(),
            patch.description.as_deref(),
            patch.price,
        )?;
        patch.apply(&mut plan, Utc::now());
        Ok(self.plans.save(&plan).await?)
    }
}

pub struct DeletePlan<'a, P, S>
where
    P: PlanRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
{
    pub plans: &'a P,
    pub subscriptions: &'a S,
}

impl<'a, P, S> DeletePlan<'a, P, S>
where
    P: PlanRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
{
    /// Ends every subscription to the plan, then removes it.
    pub async fn execute(&self, plan_id: Uuid, owner_id: Uuid) -> ServiceResult<()> {
        let plan = self
            .plans
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Plan"))?;
        if plan.owner_id != owner_id {
            return Err(ServiceError::forbidden("You can only delete your own plans"));
        }
        let ended = self
            .subscriptions
            .mark_plan_removed(plan.id, PLAN_REMOVED_REASON, Utc::now())
            .await?;
        self.plans.delete(plan.id).await?;
        info!(plan_id = %plan.id, subscriptions = ended, "plan_deleted");
        Ok(())
    }
}
