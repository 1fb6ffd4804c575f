use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::meal_passes::current_passes::CurrentPasses;
use crate::application::use_cases::meal_passes::validate_pass::ValidatePass;
use crate::bootstrap::app_context::AppContext;
use crate::domain::meal_pass::MealPass;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::wire::{MessBrief, PlanBrief, Ref, SubscriptionBrief, UserRef};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateBody {
    #[serde(default)]
    pub qr_code: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealPassOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    #[schema(value_type = Object)]
    pub user_id: Ref<UserRef>,
    #[schema(value_type = Object)]
    pub subscription_id: Ref<SubscriptionBrief>,
    /// Owner account id of the issuing plan.
    pub mess_id: Uuid,
    pub qr_code: String,
    pub is_active: bool,
    pub is_blocked: bool,
    pub block_reason: Option<String>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_till: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mess_details: Option<MessBrief>,
}

impl MealPassOut {
    fn new(p: MealPass, user: Ref<UserRef>, subscription: Ref<SubscriptionBrief>) -> Self {
        Self {
            id: p.id,
            record_id: p.id,
            user_id: user,
            subscription_id: subscription,
            mess_id: p.owner_id,
            qr_code: p.qr_code,
            is_active: p.is_active,
            is_blocked: p.is_blocked,
            block_reason: p.block_reason,
            valid_from: p.valid_from,
            valid_till: p.valid_till,
            created_at: p.created_at,
            updated_at: p.updated_at,
            mess_details: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub valid: bool,
    pub meal_pass: MealPassOut,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/validate/:user_id", post(validate_pass))
        .route("/current/:user_id", get(current_passes))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/mealpass/validate/{user_id}", tag = "Meal passes", request_body = ValidateBody,
    params(("user_id" = Uuid, Path, description = "Scanning mess owner")),
    responses(
        (status = 200, body = ValidationResponse),
        (status = 403, body = crate::presentation::http::error::ErrorBody),
        (status = 404, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn validate_pass(
    State(ctx): State<AppContext>,
    Path(scanner_id): Path<Uuid>,
    Json(body): Json<ValidateBody>,
) -> ApiResult<Json<ValidationResponse>> {
    let passes = ctx.meal_pass_repo();
    let subscriptions = ctx.subscription_repo();
    let plans = ctx.plan_repo();
    let users = ctx.user_repo();
    let uc = ValidatePass {
        passes: passes.as_ref(),
        subscriptions: subscriptions.as_ref(),
        plans: plans.as_ref(),
        users: users.as_ref(),
    };
    let v = uc.execute(body.qr_code.trim()).await?;
    info!(meal_pass_id = %v.pass.id, scanner_id = %scanner_id, "meal_pass_validated");
    let user = Ref::Populated(UserRef::with_email(&v.holder));
    let subscription = Ref::resolve(
        v.subscription.id,
        v.plan
            .as_ref()
            .map(|p| SubscriptionBrief::with_status(&v.subscription, PlanBrief::summary(p))),
    );
    Ok(Json(ValidationResponse {
        valid: true,
        meal_pass: MealPassOut::new(v.pass, user, subscription),
    }))
}

#[utoipa::path(get, path = "/api/mealpass/current/{user_id}", tag = "Meal passes",
    params(("user_id" = Uuid, Path, description = "Pass holder")),
    responses((status = 200, body = [MealPassOut]), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn current_passes(
    State(ctx): State<AppContext>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MealPassOut>>> {
    let passes = ctx.meal_pass_repo();
    let subscriptions = ctx.subscription_repo();
    let plans = ctx.plan_repo();
    let messes = ctx.mess_repo();
    let uc = CurrentPasses {
        passes: passes.as_ref(),
        subscriptions: subscriptions.as_ref(),
        plans: plans.as_ref(),
        messes: messes.as_ref(),
    };
    let rows = uc.execute(user_id).await?;
    let out = rows
        .into_iter()
        .map(|row| {
            let subscription = Ref::resolve(
                row.pass.subscription_id,
                row.subscription
                    .as_ref()
                    .map(|(s, p)| SubscriptionBrief::with_window(s, PlanBrief::priced(p))),
            );
            let user = Ref::Id(row.pass.user_id);
            MealPassOut {
                mess_details: row.mess.as_ref().map(MessBrief::located),
                ..MealPassOut::new(row.pass, user, subscription)
            }
        })
        .collect();
    Ok(Json(out))
}
