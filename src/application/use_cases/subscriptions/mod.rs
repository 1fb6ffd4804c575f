pub mod change_status;
pub mod list_plans;
pub mod manage_plans;
pub mod list_subscriptions;
pub mod subscribe;
