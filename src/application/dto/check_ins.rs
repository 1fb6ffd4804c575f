use uuid::Uuid;

use crate::domain::check_in::CheckIn;
use crate::domain::subscriptions::SubscriptionPlan;
use crate::domain::users::User;

#[derive(Debug, Clone)]
pub struct CheckInPlanDto {
    pub meal_pass_id: Uuid,
    pub subscription_id: Uuid,
    pub plan: SubscriptionPlan,
}

#[derive(Debug, Clone)]
pub struct CheckInEntryDto {
    pub check_in: CheckIn,
    pub user: Option<User>,
    pub plan: Option<CheckInPlanDto>,
}
