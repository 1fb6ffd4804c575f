use chrono::Utc;
use uuid::Uuid;

use crate::application::dto::check_ins::{CheckInEntryDto, CheckInPlanDto};
use crate::application::errors::ServiceResult;
use crate::application::ports::check_in_repository::CheckInRepository;
use crate::application::ports::meal_pass_repository::MealPassRepository;
use crate::application::ports::plan_repository::PlanRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::check_in::{CheckInFilter, MealTally};

pub struct ListCheckIns<'a, C, U, MP, S, P>
where
    C: CheckInRepository + ?Sized,
    U: UserRepository + ?Sized,
    MP: MealPassRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    P: PlanRepository + ?Sized,
{
    pub check_ins: &'a C,
    pub users: &'a U,
    pub passes: &'a MP,
    pub subscriptions: &'a S,
    pub plans: &'a P,
}

impl<'a, C, U, MP, S, P> ListCheckIns<'a, C, U, MP, S, P>
where
    C: CheckInRepository + ?Sized,
    U: UserRepository + ?Sized,
    MP: MealPassRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    P: PlanRepository + ?Sized,
{
    pub async fn execute(
        &self,
        mess_id: Uuid,
        filter: &CheckInFilter,
    ) -> ServiceResult<Vec<CheckInEntryDto>> {
        let rows = self.check_ins.list(mess_id, filter).await?;
        let mut out = Vec::with_capacity(rows.len());
        for check_in in rows {
            let user = self.users.find_by_id(check_in.user_id).await?;
            let plan = self.plan_of(check_in.meal_pass_id).await?;
            out.push(CheckInEntryDto {
                check_in,
                user,
                plan,
            });
        }
        Ok(out)
    }

    /// Resolves pass → subscription → plan; any missing link yields `None`.
    async fn plan_of(&self, meal_pass_id: Uuid) -> anyhow::Result<Option<CheckInPlanDto>> {
        let Some(pass) = self.passes.find_by_id(meal_pass_id).await? else {
            return Ok(None);
        };
        let Some(subscription) = self.subscriptions.find_by_id(pass.subscription_id).await? else {
            return Ok(None);
        };
        Ok(self
            .plans
            .find_by_id(subscription.plan_id)
            .await?
            .map(|plan| CheckInPlanDto {
                meal_pass_id: pass.id,
                subscription_id: subscription.id,
                plan,
            }))
    }
}

pub struct TodayStats<'a, C: CheckInRepository + ?Sized> {
    pub repo: &'a C,
}

impl<'a, C: CheckInRepository + ?Sized> TodayStats<'a, C> {
    pub async fn execute(&self, mess_id: Uuid) -> ServiceResult<MealTally> {
        Ok(self
            .repo
            .tally_successful(mess_id, Utc::now().date_naive())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::check_ins::record_check_in::RecordCheckIn;
    use crate::application::use_cases::subscriptions::subscribe::Subscribe;
    use crate::domain::check_in::MealType;
    use crate::domain::subscriptions::{NewPlan, PlanDuration, PlanMealType, SubscriptionStatus};
    use crate::domain::users::LoginRole;
    use crate::testing::{MemoryStore, seed_user};

    #[tokio::test]
    async fn filters_populate_and_counts() {
        let store = MemoryStore::default();
        let owner = seed_user(&store, "owner", LoginRole::MessOwner).await;
        let diner = seed_user(&store, "diner", LoginRole::User).await;
        let plan = PlanRepository::create(
            &store,
            &NewPlan {
                owner_id: owner.id,
                plan_name: "Weekly Veg".into(),
                duration: PlanDuration::Weekly,
                meal_type: PlanMealType::Veg,
                price: 650.0,
                description: "All meals".into(),
            },
        )
        .await
        .unwrap();
        let sub = Subscribe {
            users: &store,
            plans: &store,
            subscriptions: &store,
            passes: &store,
        }
        .execute(diner.id, plan.id)
        .await
        .unwrap();
        store.update_subscription(sub.id, |s| s.status = SubscriptionStatus::Active);
        let pass = store.passes().remove(0);

        let record = RecordCheckIn {
            passes: &store,
            subscriptions: &store,
            check_ins: &store,
        };
        record.execute(owner.id, pass.id, MealType::Breakfast).await.unwrap();
        record.execute(owner.id, pass.id, MealType::Lunch).await.unwrap();

        let list = ListCheckIns {
            check_ins: &store,
            users: &store,
            passes: &store,
            subscriptions: &store,
            plans: &store,
        };
        let all = list.execute(owner.id, &CheckInFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].check_in.meal_type, MealType::Lunch);
        assert_eq!(all[0].user.as_ref().unwrap().username, "diner");
        assert_eq!(all[0].plan.as_ref().unwrap().plan.plan_name, "Weekly Veg");

        let lunch_only = CheckInFilter {
            meal_type: Some(MealType::Lunch),
            ..Default::default()
        };
        assert_eq!(list.execute(owner.id, &lunch_only).await.unwrap().len(), 1);
        let other_day = CheckInFilter {
            served_on: Some(Utc::now().date_naive() - chrono::Duration::days(2)),
            ..Default::default()
        };
        assert!(list.execute(owner.id, &other_day).await.unwrap().is_empty());

        let tally = TodayStats { repo: &store }.execute(owner.id).await.unwrap();
        assert_eq!(
            tally,
            MealTally {
                breakfast: 1,
                lunch: 1,
                dinner: 0
            }
        );
    }
}
