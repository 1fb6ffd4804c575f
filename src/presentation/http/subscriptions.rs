use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::subscriptions::PlanWithMessDto;
use crate::application::use_cases::subscriptions::change_status::ChangeSubscriptionStatus;
use crate::application::use_cases::subscriptions::list_plans::ListPlans;
use crate::application::use_cases::subscriptions::list_subscriptions::ListSubscriptions;
use crate::application::use_cases::subscriptions::manage_plans::{CreatePlan, DeletePlan, UpdatePlan};
use crate::application::use_cases::subscriptions::subscribe::Subscribe;
use crate::bootstrap::app_context::AppContext;
use crate::domain::subscriptions::{
    NewPlan, PlanDuration, PlanMealType, PlanPatch, SubscriptionPlan, SubscriptionStatus,
    UserSubscription,
};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::wire::{MessOut, Ref, SuccessMessage, UserRef};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanBody {
    pub user_id: Uuid,
    #[serde(default)]
    pub plan_name: String,
    #[schema(value_type = String, example = "Monthly")]
    pub duration: PlanDuration,
    #[schema(value_type = String, example = "Veg")]
    pub meal_type: PlanMealType,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanBody {
    pub user_id: Uuid,
    pub plan_name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub duration: Option<PlanDuration>,
    #[schema(value_type = Option<String>)]
    pub meal_type: Option<PlanMealType>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeBody {
    pub plan_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivateBody {
    #[schema(value_type = Option<String>, example = "Active")]
    pub status: Option<SubscriptionStatus>,
    pub mess_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    /// Owner account id.
    pub mess_id: Uuid,
    pub plan_name: String,
    pub duration: String,
    pub meal_type: String,
    pub price: f64,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mess_details: Option<MessOut>,
}

impl From<&SubscriptionPlan> for PlanOut {
    fn from(p: &SubscriptionPlan) -> Self {
        Self {
            id: p.id,
            record_id: p.id,
            mess_id: p.owner_id,
            plan_name: p.plan_name.clone(),
            duration: p.duration.as_str().to_string(),
            meal_type: p.meal_type.as_str().to_string(),
            price: p.price,
            description: p.description.clone(),
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
            mess_details: None,
        }
    }
}

impl From<&PlanWithMessDto> for PlanOut {
    fn from(d: &PlanWithMessDto) -> Self {
        Self {
            mess_details: d.mess.as_ref().map(MessOut::from),
            ..PlanOut::from(&d.plan)
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    #[schema(value_type = Object)]
    pub user_id: Ref<UserRef>,
    #[schema(value_type = Object)]
    pub plan_id: Ref<PlanOut>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub payment_id: Option<String>,
    pub payment_status: String,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionOut {
    fn new(s: UserSubscription, user: Ref<UserRef>, plan: Ref<PlanOut>) -> Self {
        Self {
            id: s.id,
            record_id: s.id,
            user_id: user,
            plan_id: plan,
            start_date: s.start_date,
            end_date: s.end_date,
            status: s.status.as_str().to_string(),
            payment_id: s.payment_id,
            payment_status: s.payment_status.as_str().to_string(),
            cancellation_reason: s.cancellation_reason,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<UserSubscription> for SubscriptionOut {
    fn from(s: UserSubscription) -> Self {
        let (user, plan) = (Ref::Id(s.user_id), Ref::Id(s.plan_id));
        Self::new(s, user, plan)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/plans", get(list_active_plans).post(create_plan))
        .route("/plans/:plan_id", put(update_plan))
        .route("/plans/:plan_id/:mess_id", delete(delete_plan))
        .route("/mess/:mess_id/plans", get(list_owner_plans))
        .route("/mess/:mess_id/subscribers", get(list_subscribers))
        .route("/subscribe", post(subscribe))
        .route("/user/:user_id", get(list_user_subscriptions))
        .route("/:subscription_id/activate", put(activate))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/subscriptions/plans", tag = "Subscriptions", request_body = CreatePlanBody, responses(
    (status = 200, body = PlanOut),
    (status = 403, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn create_plan(
    State(ctx): State<AppContext>,
    Json(body): Json<CreatePlanBody>,
) -> ApiResult<Json<PlanOut>> {
    let users = ctx.user_repo();
    let plans = ctx.plan_repo();
    let uc = CreatePlan {
        users: users.as_ref(),
        plans: plans.as_ref(),
    };
    let plan = uc
        .execute(NewPlan {
            owner_id: body.user_id,
            plan_name: body.plan_name,
            duration: body.duration,
            meal_type: body.meal_type,
            price: body.price,
            description: body.description,
        })
        .await?;
    info!(plan_id = %plan.id, owner_id = %plan.owner_id, "plan_created");
    Ok(Json(PlanOut::from(&plan)))
}

#[utoipa::path(put, path = "/api/subscriptions/plans/{plan_id}", tag = "Subscriptions", request_body = UpdatePlanBody,
    params(("plan_id" = Uuid, Path, description = "Plan id")),
    responses((status = 200, body = PlanOut), (status = 403, body = crate::presentation::http::error::ErrorBody)))]
pub async fn update_plan(
    State(ctx): State<AppContext>,
    Path(plan_id): Path<Uuid>,
    Json(body): Json<UpdatePlanBody>,
) -> ApiResult<Json<PlanOut>> {
    let users = ctx.user_repo();
    let plans = ctx.plan_repo();
    let uc = UpdatePlan {
        users: users.as_ref(),
        plans: plans.as_ref(),
    };
    let patch = PlanPatch {
        plan_name: body.plan_name,
        duration: body.duration,
        meal_type: body.meal_type,
        price: body.price,
        description: body.description,
        is_active: body.is_active,
    };
    let plan = uc.execute(plan_id, body.user_id, patch).await?;
    Ok(Json(PlanOut::from(&plan)))
}

#[utoipa::path(delete, path = "/api/subscriptions/plans/{plan_id}/{mess_id}", tag = "Subscriptions",
    params(
        ("plan_id" = Uuid, Path, description = "Plan id"),
        ("mess_id" = Uuid, Path, description = "Owner account id")
    ),
    responses((status = 200, body = SuccessMessage), (status = 403, body = crate::presentation::http::error::ErrorBody)))]
pub async fn delete_plan(
    State(ctx): State<AppContext>,
    Path((plan_id, owner_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<SuccessMessage>> {
    let plans = ctx.plan_repo();
    let subscriptions = ctx.subscription_repo();
    let uc = DeletePlan {
        plans: plans.as_ref(),
        subscriptions: subscriptions.as_ref(),
    };
    uc.execute(plan_id, owner_id).await?;
    Ok(Json(SuccessMessage::new("Plan deleted successfully")))
}

#[utoipa::path(get, path = "/api/subscriptions/mess/{mess_id}/plans", tag = "Subscriptions",
    params(("mess_id" = Uuid, Path, description = "Owner account id")),
    responses((status = 200, body = [PlanOut])))]
pub async fn list_owner_plans(
    State(ctx): State<AppContext>,
    Path(owner_id): Path<Uuid>,
) -> ApiResult<Json<Vec<PlanOut>>> {
    let plans = ctx.plan_repo();
    let messes = ctx.mess_repo();
    let uc = ListPlans {
        plans: plans.as_ref(),
        messes: messes.as_ref(),
    };
    let rows = uc.by_owner(owner_id).await?;
    Ok(Json(rows.iter().map(PlanOut::from).collect()))
}

#[utoipa::path(get, path = "/api/subscriptions/plans", tag = "Subscriptions", responses((status = 200, body = [PlanOut])))]
pub async fn list_active_plans(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<PlanOut>>> {
    let plans = ctx.plan_repo();
    let messes = ctx.mess_repo();
    let uc = ListPlans {
        plans: plans.as_ref(),
        messes: messes.as_ref(),
    };
    let rows = uc.active().await?;
    Ok(Json(rows.iter().map(PlanOut::from).collect()))
}

#[utoipa::path(post, path = "/api/subscriptions/subscribe", tag = "Subscriptions", request_body = SubscribeBody, responses(
    (status = 200, body = SubscriptionOut),
    (status = 400, body = crate::presentation::http::error::ErrorBody),
    (status = 403, body = crate::presentation::http::error::ErrorBody),
    (status = 404, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn subscribe(
    State(ctx): State<AppContext>,
    Json(body): Json<SubscribeBody>,
) -> ApiResult<Json<SubscriptionOut>> {
    let users = ctx.user_repo();
    let plans = ctx.plan_repo();
    let subscriptions = ctx.subscription_repo();
    let passes = ctx.meal_pass_repo();
    let uc = Subscribe {
        users: users.as_ref(),
        plans: plans.as_ref(),
        subscriptions: subscriptions.as_ref(),
        passes: passes.as_ref(),
    };
    let subscription = uc.execute(body.user_id, body.plan_id).await?;
    Ok(Json(subscription.into()))
}

#[utoipa::path(get, path = "/api/subscriptions/user/{user_id}", tag = "Subscriptions",
    params(("user_id" = Uuid, Path, description = "Subscriber id")),
    responses((status = 200, body = [SubscriptionOut]), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn list_user_subscriptions(
    State(ctx): State<AppContext>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<SubscriptionOut>>> {
    let users = ctx.user_repo();
    let plans = ctx.plan_repo();
    let subscriptions = ctx.subscription_repo();
    let messes = ctx.mess_repo();
    let uc = ListSubscriptions {
        users: users.as_ref(),
        plans: plans.as_ref(),
        subscriptions: subscriptions.as_ref(),
        messes: messes.as_ref(),
    };
    let rows = uc.for_user(user_id).await?;
    let out = rows
        .into_iter()
        .map(|row| {
            let plan = Ref::resolve(row.subscription.plan_id, row.plan.as_ref().map(PlanOut::from));
            let user = Ref::Id(row.subscription.user_id);
            SubscriptionOut::new(row.subscription, user, plan)
        })
        .collect();
    Ok(Json(out))
}

#[utoipa::path(get, path = "/api/subscriptions/mess/{mess_id}/subscribers", tag = "Subscriptions",
    params(("mess_id" = Uuid, Path, description = "Owner account id")),
    responses((status = 200, body = [SubscriptionOut])))]
pub async fn list_subscribers(
    State(ctx): State<AppContext>,
    Path(owner_id): Path<Uuid>,
) -> ApiResult<Json<Vec<SubscriptionOut>>> {
    let users = ctx.user_repo();
    let plans = ctx.plan_repo();
    let subscriptions = ctx.subscription_repo();
    let messes = ctx.mess_repo();
    let uc = ListSubscriptions {
        users: users.as_ref(),
        plans: plans.as_ref(),
        subscriptions: subscriptions.as_ref(),
        messes: messes.as_ref(),
    };
    let rows = uc.subscribers(owner_id).await?;
    let out = rows
        .into_iter()
        .map(|row| {
            let user = Ref::resolve(row.subscription.user_id, row.user.as_ref().map(UserRef::with_email));
            let plan = Ref::resolve(row.subscription.plan_id, row.plan.as_ref().map(PlanOut::from));
            SubscriptionOut::new(row.subscription, user, plan)
        })
        .collect();
    Ok(Json(out))
}

#[utoipa::path(put, path = "/api/subscriptions/{subscription_id}/activate", tag = "Subscriptions", request_body = ActivateBody,
    params(("subscription_id" = Uuid, Path, description = "Subscription id")),
    responses((status = 200, body = SubscriptionOut), (status = 403, body = crate::presentation::http::error::ErrorBody)))]
pub async fn activate(
    State(ctx): State<AppContext>,
    Path(subscription_id): Path<Uuid>,
    body: Option<Json<ActivateBody>>,
) -> ApiResult<Json<SubscriptionOut>> {
    let Json(body) = body.unwrap_or_default();
    let plans = ctx.plan_repo();
    let subscriptions = ctx.subscription_repo();
    let uc = ChangeSubscriptionStatus {
        plans: plans.as_ref(),
        subscriptions: subscriptions.as_ref(),
    };
    let updated = uc
        .execute(subscription_id, body.status, body.mess_id)
        .await?;
    info!(subscription_id = %updated.id, status = %updated.status, "subscription_status_changed");
    Ok(Json(updated.into()))
}
