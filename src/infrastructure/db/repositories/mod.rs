pub mod check_in_repository_sqlx;
pub mod feedback_repository_sqlx;
pub mod forum_repository_sqlx;
pub mod meal_pass_repository_sqlx;
pub mod menu_repository_sqlx;
pub mod mess_repository_sqlx;
pub mod plan_repository_sqlx;
pub mod prebooking_repository_sqlx;
pub mod subscription_repository_sqlx;
pub mod user_repository_sqlx;
