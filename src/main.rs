use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use axum::{Json, Router, routing::get};
use dotenvy::dotenv;
use http::HeaderValue;
use serde_json::{Value, json};
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use messbuddy_api::bootstrap::app_context::{AppContext, AppServices};
use messbuddy_api::bootstrap::config::Config;
use messbuddy_api::infrastructure::db::repositories::{
    check_in_repository_sqlx::SqlxCheckInRepository,
    feedback_repository_sqlx::SqlxFeedbackRepository, forum_repository_sqlx::SqlxForumRepository,
    meal_pass_repository_sqlx::SqlxMealPassRepository, menu_repository_sqlx::SqlxMenuRepository,
    mess_repository_sqlx::SqlxMessRepository, plan_repository_sqlx::SqlxPlanRepository,
    prebooking_repository_sqlx::SqlxPrebookingRepository,
    subscription_repository_sqlx::SqlxSubscriptionRepository,
    user_repository_sqlx::SqlxUserRepository,
};
use messbuddy_api::presentation::http as api;

#[derive(OpenApi)]
#[openapi(
        paths(
            api::health::health,
            api::auth::signup,
            api::auth::signin,
            api::auth::signout,
            api::users::get_profile,
            api::users::update_profile,
            api::users::delete_profile,
            api::users::signout,
            api::users::get_user,
            api::messes::list_messes,
            api::messes::create_mess,
            api::messes::my_mess,
            api::messes::read_mess,
            api::messes::get_by_owner,
            api::messes::update_by_owner,
            api::messes::update_owned,
            api::messes::delete_by_owner,
            api::messes::delete_owned,
            api::messes::get_rating,
            api::messes::rate_mess,
            api::messes::has_rated,
            api::menus::list_all,
            api::menus::create_menu,
            api::menus::list_by_owner,
            api::menus::search_menus,
            api::menus::update_menu,
            api::menus::delete_menu,
            api::feedback::submit_feedback,
            api::feedback::list_feedback,
            api::prebookings::create_prebooking,
            api::prebookings::list_all,
            api::prebookings::list_for_user,
            api::prebookings::list_for_mess,
            api::prebookings::update_status,
            api::prebookings::delete_prebooking,
            api::subscriptions::create_plan,
            api::subscriptions::update_plan,
            api::subscriptions::delete_plan,
            api::subscriptions::list_owner_plans,
            api::subscriptions::list_active_plans,
            api::subscriptions::subscribe,
            api::subscriptions::list_user_subscriptions,
            api::subscriptions::list_subscribers,
            api::subscriptions::activate,
            api::meal_passes::validate_pass,
            api::meal_passes::current_passes,
            api::check_ins::record_check_in,
            api::check_ins::list_check_ins,
            api::check_ins::today_stats,
            api::forum::create_post,
            api::forum::list_posts,
            api::forum::add_comment,
            api::forum::vote_poll,
            api::forum::like_post,
            api::forum::like_comment,
            api::forum::delete_comment,
            api::forum::update_post,
            api::forum::delete_post,
        ),
        components(schemas(
            api::error::ErrorBody,
            api::wire::SuccessMessage,
            api::wire::Message,
            api::wire::UserOut,
            api::wire::UserRef,
            api::wire::MessOut,
            api::wire::MessBrief,
            api::wire::PlanBrief,
            api::wire::SubscriptionBrief,
            api::health::HealthResp,
            api::auth::SignupRequest,
            api::auth::SigninRequest,
            api::auth::AuthResponse,
            api::users::UpdateProfileRequest,
            api::messes::CreateMessBody,
            api::messes::UpdateMessBody,
            api::messes::RatingBody,
            api::messes::MessListResponse,
            api::messes::MessResponse,
            api::messes::RatingResponse,
            api::messes::HasRatedResponse,
            api::menus::MenuOut,
            api::menus::CreateMenuBody,
            api::menus::UpdateMenuBody,
            api::menus::MenusResponse,
            api::menus::MenuResponse,
            api::feedback::SubmitFeedbackBody,
            api::feedback::FeedbackOut,
            api::feedback::FeedbackSubmitted,
            api::feedback::FeedbackList,
            api::prebookings::CreatePrebookingBody,
            api::prebookings::StatusBody,
            api::prebookings::PrebookingOut,
            api::prebookings::PrebookingResponse,
            api::prebookings::PrebookingList,
            api::subscriptions::CreatePlanBody,
            api::subscriptions::UpdatePlanBody,
            api::subscriptions::SubscribeBody,
            api::subscriptions::ActivateBody,
            api::subscriptions::PlanOut,
            api::subscriptions::SubscriptionOut,
            api::meal_passes::ValidateBody,
            api::meal_passes::MealPassOut,
            api::meal_passes::ValidationResponse,
            api::check_ins::CheckInBody,
            api::check_ins::CheckInOut,
            api::check_ins::PassRef,
            api::check_ins::SubscriptionPlanRef,
            api::check_ins::TodayStatsOut,
            api::forum::CreatePostBody,
            api::forum::EditPostBody,
            api::forum::CommentBody,
            api::forum::VoteBody,
            api::forum::CommentOut,
            api::forum::PollOptionOut,
            api::forum::PostOut,
            api::forum::PaginationOut,
            api::forum::PostPage,
        )),
        tags(
            (name = "Auth", description = "Signup, signin and session cookies"),
            (name = "Users", description = "Profiles"),
            (name = "Messes", description = "Mess profiles and ratings"),
            (name = "Menus", description = "Menu items per mess owner"),
            (name = "Feedback", description = "Diner feedback"),
            (name = "Prebookings", description = "Meal prebookings"),
            (name = "Subscriptions", description = "Plans and subscriptions"),
            (name = "Meal passes", description = "QR meal passes"),
            (name = "Check-ins", description = "Meal check-ins"),
            (name = "Forum", description = "Community posts, comments and polls"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

async fn root() -> Json<Value> {
    Json(json!({
        "message": "MessBuddy API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/docs",
    }))
}

fn cors_layer(cfg: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "cors_origin_ignored");
                None
            }
        })
        .collect();
    let allow_origin = if origins.is_empty() && !cfg.is_production {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::PATCH,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = ?e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                warn!(error = ?e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "messbuddy_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.api_port,
        production = cfg.is_production,
        origins = ?cfg.cors_origins,
        "starting MessBuddy API"
    );

    let pool = messbuddy_api::infrastructure::db::connect_pool(
        &cfg.database_url,
        cfg.database_max_connections,
    )
    .await?;
    messbuddy_api::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxUserRepository::new(pool.clone())),
        Arc::new(SqlxMessRepository::new(pool.clone())),
        Arc::new(SqlxMenuRepository::new(pool.clone())),
        Arc::new(SqlxFeedbackRepository::new(pool.clone())),
        Arc::new(SqlxPrebookingRepository::new(pool.clone())),
        Arc::new(SqlxPlanRepository::new(pool.clone())),
        Arc::new(SqlxSubscriptionRepository::new(pool.clone())),
        Arc::new(SqlxMealPassRepository::new(pool.clone())),
        Arc::new(SqlxCheckInRepository::new(pool.clone())),
        Arc::new(SqlxForumRepository::new(pool.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .route("/", get(root))
        .merge(api::health::routes(pool.clone()))
        .merge(api::api_routes(ctx))
        .merge(SwaggerUi::new("/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("server stopped");
    Ok(())
}
