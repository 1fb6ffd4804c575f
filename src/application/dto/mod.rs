pub mod check_ins;
pub mod feedback;
pub mod forum;
pub mod meal_passes;
pub mod prebookings;
pub mod subscriptions;
