pub mod auth;
pub mod check_ins;
pub mod feedback;
pub mod forum;
pub mod meal_passes;
pub mod menus;
pub mod messes;
pub mod prebookings;
pub mod subscriptions;
pub mod users;
