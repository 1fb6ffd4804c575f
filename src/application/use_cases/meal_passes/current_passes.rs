use chrono::Utc;
use uuid::Uuid;

use crate::application::dto::meal_passes::CurrentPassDto;
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::meal_pass_repository::MealPassRepository;
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::plan_repository::PlanRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;

pub struct CurrentPasses<'a, MP, S, P, M>
where
    MP: MealPassRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    P: PlanRepository + ?Sized,
    M: MessRepository + ?Sized,
{
    pub passes: &'a MP,
    pub subscriptions: &'a S,
    pub plans: &'a P,
    pub messes: &'a M,
}

impl<'a, MP, S, P, M> CurrentPasses<'a, MP, S, P, M>
where
    MP: MealPassRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    P: PlanRepository + ?Sized,
    M: MessRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> ServiceResult<Vec<CurrentPassDto>> {
        let passes = self.passes.list_current(user_id, Utc::now()).await?;
        if passes.is_empty() {
            return Err(ServiceError::NotFound(
                "No active meal passes found".to_string(),
            ));
        }
        let mut out = Vec::with_capacity(passes.len());
        for pass in passes {
            let subscription = match self.subscriptions.find_by_id(pass.subscription_id).await? {
                Some(sub) => self
                    .plans
                    .find_by_id(sub.plan_id)
                    .await?
                    .map(|plan| (sub, plan)),
                None => None,
            };
            let mess = self.messes.find_by_owner(pass.owner_id).await?;
            out.push(CurrentPassDto {
                pass,
                subscription,
                mess,
            });
        }
        Ok(out)
    }
}
