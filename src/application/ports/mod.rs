pub mod check_in_repository;
pub mod feedback_repository;
pub mod forum_repository;
pub mod meal_pass_repository;
pub mod menu_repository;
pub mod mess_repository;
pub mod plan_repository;
pub mod prebooking_repository;
pub mod subscription_repository;
pub mod user_repository;
