use chrono::Utc;
use tracing::warn;

use crate::application::dto::meal_passes::ValidatedPassDto;
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::meal_pass_repository::MealPassRepository;
use crate::application::ports::plan_repository::PlanRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::application::ports::user_repository::UserRepository;

pub struct ValidatePass<'a, MP, S, P, U>
where
    MP: MealPassRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    P: PlanRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub passes: &'a MP,
    pub subscriptions: &'a S,
    pub plans: &'a P,
    pub users: &'a U,
}

impl<'a, MP, S, P, U> ValidatePass<'a, MP, S, P, U>
where
    MP: MealPassRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    P: PlanRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    /// Checks a scanned QR code. The first failing check decides the error.
    pub async fn execute(&self, qr_code: &str) -> ServiceResult<ValidatedPassDto> {
        let pass = self
            .passes
            .find_by_qr_code(qr_code)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Invalid QR code".to_string()))?;
        if pass.is_blocked {
            let msg = match pass.block_reason.as_deref() {
                Some(reason) => format!("User is blocked: {reason}"),
                None => "User is blocked".to_string(),
            };
            return Err(ServiceError::forbidden(msg));
        }
        if !pass.is_active {
            return Err(ServiceError::forbidden("Meal pass is not active"));
        }
        if !pass.is_within_window(Utc::now()) {
            return Err(ServiceError::forbidden("Meal pass has expired"));
        }
        let subscription = self
            .subscriptions
            .find_by_id(pass.subscription_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Subscription"))?;
        if !subscription.is_active() {
            return Err(ServiceError::forbidden("Subscription is not active"));
        }
        let holder = self
            .users
            .find_by_id(pass.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;
        let plan = self.plans.find_by_id(subscription.plan_id).await?;
        if plan.is_none() {
            warn!(subscription_id = %subscription.id, "validated_pass_without_plan");
        }
        Ok(ValidatedPassDto {
            pass,
            holder,
            subscription,
            plan,
        })
    }
}
