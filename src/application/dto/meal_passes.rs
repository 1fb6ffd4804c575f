use crate::domain::meal_pass::MealPass;
use crate::domain::mess::Mess;
use crate::domain::subscriptions::{SubscriptionPlan, UserSubscription};
use crate::domain::users::User;

#[derive(Debug, Clone)]
pub struct ValidatedPassDto {
    pub pass: MealPass,
    pub holder: User,
    pub subscription: UserSubscription,
    pub plan: Option<SubscriptionPlan>,
}

#[derive(Debug, Clone)]
pub struct CurrentPassDto {
    pub pass: MealPass,
    /// Present only when both the subscription and its plan still exist.
    pub subscription: Option<(UserSubscription, SubscriptionPlan)>,
    pub mess: Option<Mess>,
}
