use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::meal_pass_repository::MealPassRepository;
use crate::application::ports::plan_repository::PlanRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::meal_pass::{NewMealPass, QrPayload};
use crate::domain::subscriptions::{NewSubscription, SubscriptionPlan, UserSubscription};

const ALREADY_SUBSCRIBED: &str =
    "You have already subscribed to this plan before. Each plan can only be subscribed once.";

pub struct Subscribe<'a, U, P, S, MP>
where
    U: UserRepository + ?Sized,
    P: PlanRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    MP: MealPassRepository + ?Sized,
{
    pub users: &'a U,
    pub plans: &'a P,
    pub subscriptions: &'a S,
    pub passes: &'a MP,
}

impl<'a, U, P, S, MP> Subscribe<'a, U, P, S, MP>
where
    U: UserRepository + ?Sized,
    P: PlanRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    MP: MealPassRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid, plan_id: Uuid) -> ServiceResult<UserSubscription> {
        let user = self.users.find_by_id(user_id).await?;
        if !user.is_some_and(|u| !u.is_mess_owner()) {
            return Err(ServiceError::forbidden("Only users can subscribe to plans"));
        }
        let plan = match self.plans.find_by_id(plan_id).await? {
            Some(p) if p.is_active => p,
            _ => {
                return Err(ServiceError::NotFound(
                    "Plan not found or inactive".to_string(),
                ));
            }
        };
        if self.subscriptions.exists_for(user_id, plan.id).await? {
            return Err(ServiceError::invalid(ALREADY_SUBSCRIBED));
        }

        let (start_date, end_date) = plan.duration.window_from(Utc::now());
        let subscription = self
            .subscriptions
            .create(&NewSubscription {
                user_id,
                plan_id: plan.id,
                start_date,
                end_date,
            })
            .await?
            .ok_or_else(|| ServiceError::invalid(ALREADY_SUBSCRIBED))?;
        info!(user_id = %user_id, plan_id = %plan.id, subscription_id = %subscription.id, "subscribed");

        if let Err(e) = self.issue_pass(&plan, &subscription).await {
            error!(subscription_id = %subscription.id, error = ?e, "meal_pass_issue_failed");
        }
        Ok(subscription)
    }

    async fn issue_pass(
        &self,
        plan: &SubscriptionPlan,
        subscription: &UserSubscription,
    ) -> anyhow::Result<()> {
        let qr_code = QrPayload {
            user_id: subscription.user_id,
            subscription_id: subscription.id,
            plan_id: plan.id,
            owner_id: plan.owner_id,
            meal_type: plan.meal_type.as_str(),
            issued_at: Utc::now(),
        }
        .qr_code();
        let pass = self
            .passes
            .create(&NewMealPass {
                user_id: subscription.user_id,
                subscription_id: subscription.id,
                owner_id: plan.owner_id,
                qr_code,
                valid_from: subscription.start_date,
                valid_till: subscription.end_date,
            })
            .await?;
        info!(meal_pass_id = %pass.id, subscription_id = %subscription.id, "meal_pass_issued");
        Ok(())
    }
}
