use crate::domain::mess::Mess;
use crate::domain::subscriptions::{SubscriptionPlan, UserSubscription};
use crate::domain::users::User;

#[derive(Debug, Clone)]
pub struct PlanWithMessDto {
    pub plan: SubscriptionPlan,
    /// The mess run by the plan's owner, if any.
    pub mess: Option<Mess>,
}

#[derive(Debug, Clone)]
pub struct UserSubscriptionDto {
    pub subscription: UserSubscription,
    pub plan: Option<PlanWithMessDto>,
}

#[derive(Debug, Clone)]
pub struct SubscriberDto {
    pub subscription: UserSubscription,
    pub user: Option<User>,
    pub plan: Option<SubscriptionPlan>,
}
