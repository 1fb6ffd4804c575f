use std::collections::HashMap;

use uuid::Uuid;

use crate::application::dto::subscriptions::{PlanWithMessDto, SubscriberDto, UserSubscriptionDto};
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::plan_repository::PlanRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::application::ports::user_repository::UserRepository;

pub struct ListSubscriptions<'a, U, P, S, M>
where
    U: UserRepository + ?Sized,
    P: PlanRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    M: MessRepository + ?Sized,
{
    pub users: &'a U,
    pub plans: &'a P,
    pub subscriptions: &'a S,
    pub messes: &'a M,
}

impl<'a, U, P, S, M> ListSubscriptions<'a, U, P, S, M>
where
    U: UserRepository + ?Sized,
    P: PlanRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    M: MessRepository + ?Sized,
{
    /// A user's subscriptions, newest first, with plan and mess resolved.
    pub async fn for_user(&self, user_id: Uuid) -> ServiceResult<Vec<UserSubscriptionDto>> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("User"));
        }
        let rows = self.subscriptions.list_by_user(user_id).await?;
        let mut out = Vec::with_capacity(rows.len());
        for subscription in rows {
            let plan = match self.plans.find_by_id(subscription.plan_id).await? {
                Some(plan) => {
                    let mess = self.messes.find_by_owner(plan.owner_id).await?;
                    Some(PlanWithMessDto { plan, mess })
                }
                None => None,
            };
            out.push(UserSubscriptionDto { subscription, plan });
        }
        Ok(out)
    }

    /// Everyone subscribed to any plan of `owner_id`, newest first.
    pub async fn subscribers(&self, owner_id: Uuid) -> ServiceResult<Vec<SubscriberDto>> {
        let plans: HashMap<Uuid, _> = self
            .plans
            .list_by_owner(owner_id, false)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        if plans.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = plans.keys().copied().collect();
        let rows = self.subscriptions.list_by_plans(&ids).await?;
        let mut out = Vec::with_capacity(rows.len());
        for subscription in rows {
            let user = self.users.find_by_id(subscription.user_id).await?;
            let plan = plans.get(&subscription.plan_id).cloned();
            out.push(SubscriberDto {
                subscription,
                user,
                plan,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::subscriptions::subscribe::Subscribe;
    use crate::domain::subscriptions::{NewPlan, PlanDuration, PlanMealType};
    use crate::domain::users::LoginRole;
    use crate::testing::{MemoryStore, seed_mess, seed_user};

    #[tokio::test]
    async fn user_and_owner_views() {
        let store = MemoryStore::default();
        let owner = seed_user(&store, "owner", LoginRole::MessOwner).await;
        seed_mess(&store, &owner, "Sagar").await;
        let diner = seed_user(&store, "diner", LoginRole::User).await;
        let plan = PlanRepository::create(
            &store,
            &NewPlan {
                owner_id: owner.id,
                plan_name: "Weekly".into(),
                duration: PlanDuration::Weekly,
                meal_type: PlanMealType::Veg,
                price: 600.0,
                description: "Two meals a day".into(),
            },
        )
        .await
        .unwrap();
        Subscribe {
            users: &store,
            plans: &store,
            subscriptions: &store,
            passes: &store,
        }
        .execute(diner.id, plan.id)
        .await
        .unwrap();

        let uc = ListSubscriptions {
            users: &store,
            plans: &store,
            subscriptions: &store,
            messes: &store,
        };
        let mine = uc.for_user(diner.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        let resolved = mine[0].plan.as_ref().unwrap();
        assert_eq!(resolved.plan.id, plan.id);
        assert_eq!(resolved.mess.as_ref().unwrap().name, "Sagar");

        let subs = uc.subscribers(owner.id).await.unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].user.as_ref().unwrap().username, "diner");
        assert!(uc.subscribers(diner.id).await.unwrap().is_empty());

        let err = uc.for_user(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }
}
