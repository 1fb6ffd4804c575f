use uuid::Uuid;

use crate::application::dto::subscriptions::PlanWithMessDto;
use crate::application::errors::ServiceResult;
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::plan_repository::PlanRepository;
use crate::domain::subscriptions::SubscriptionPlan;

pub struct ListPlans<'a, P, M>
where
    P: PlanRepository + ?Sized,
    M: MessRepository + ?Sized,
{
    pub plans: &'a P,
    pub messes: &'a M,
}

impl<'a, P, M> ListPlans<'a, P, M>
where
    P: PlanRepository + ?Sized,
    M: MessRepository + ?Sized,
{
    /// Active plans offered by one mess owner.
    pub async fn by_owner(&self, owner_id: Uuid) -> ServiceResult<Vec<SubscriptionPlan>> {
        Ok(self.plans.list_by_owner(owner_id, true).await?)
    }

    /// Every active plan, newest first, with the offering mess attached.
    pub async fn active(&self) -> ServiceResult<Vec<PlanWithMessDto>> {
        let plans = self.plans.list_active().await?;
        let mut out = Vec::with_capacity(plans.len());
        for plan in plans {
            let mess = self.messes.find_by_owner(plan.owner_id).await?;
            out.push(PlanWithMessDto { plan, mess });
        }
        Ok(out)
    }
}
