pub mod auth;
pub mod check_ins;
pub mod error;
pub mod feedback;
pub mod forum;
pub mod health;
pub mod meal_passes;
pub mod menus;
pub mod messes;
pub mod prebookings;
pub mod subscriptions;
pub mod users;
pub mod wire;

use axum::Router;

use crate::bootstrap::app_context::AppContext;

/// Every resource router nested under its `/api` prefix.
pub fn api_routes(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api/user", users::routes(ctx.clone()))
        .nest("/api/mess", messes::routes(ctx.clone()))
        .nest("/api/menu", menus::routes(ctx.clone()))
        .nest("/api/feedback", feedback::routes(ctx.clone()))
        .nest("/api/prebooking", prebookings::routes(ctx.clone()))
        .nest("/api/subscriptions", subscriptions::routes(ctx.clone()))
        .nest("/api/mealpass", meal_passes::routes(ctx.clone()))
        .nest("/api/checkin", check_ins::routes(ctx.clone()))
        .nest("/api/forum", forum::routes(ctx))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::testing::{MemoryStore, test_context};

    #[tokio::test]
    async fn all_routers_nest_into_one_app() {
        let ctx = test_context(Arc::new(MemoryStore::default()));
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/messbuddy")
            .unwrap();
        let app = api_routes(ctx).merge(health::routes(pool));
        let _ = app.into_make_service();
    }
}
