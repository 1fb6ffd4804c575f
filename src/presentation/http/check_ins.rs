use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::dto::check_ins::CheckInEntryDto;
use crate::application::errors::ServiceError;
use crate::application::use_cases::check_ins::list_check_ins::{ListCheckIns, TodayStats};
use crate::application::use_cases::check_ins::record_check_in::RecordCheckIn;
use crate::bootstrap::app_context::AppContext;
use crate::domain::check_in::{CheckIn, CheckInFilter, MealTally, MealType, parse_day};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::wire::{PlanBrief, Ref, UserRef};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInBody {
    pub meal_pass_id: Uuid,
    #[serde(default)]
    #[schema(example = "lunch")]
    pub meal_type: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CheckInQuery {
    pub user_id: Option<String>,
    /// ISO date or datetime; selects that UTC day.
    pub date: Option<String>,
    pub meal_type: Option<String>,
}

impl CheckInQuery {
    fn into_filter(self) -> ApiResult<CheckInFilter> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let user_id = non_blank(self.user_id)
            .map(|s| Uuid::parse_str(s.trim()).map_err(|_| ServiceError::invalid("Invalid user id")))
            .transpose()?;
        let served_on = non_blank(self.date)
            .map(|s| parse_day(&s).ok_or_else(|| ServiceError::invalid("Invalid date")))
            .transpose()?;
        let meal_type = non_blank(self.meal_type)
            .map(|s| meal_type(&s))
            .transpose()?;
        Ok(CheckInFilter {
            user_id,
            served_on,
            meal_type,
        })
    }
}

fn meal_type(raw: &str) -> ApiResult<MealType> {
    MealType::parse_loose(raw).ok_or_else(|| ServiceError::invalid("Invalid meal type"))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlanRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub plan_id: PlanBrief,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub subscription_id: SubscriptionPlanRef,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    #[schema(value_type = Object)]
    pub user_id: Ref<UserRef>,
    pub mess_id: Uuid,
    #[schema(value_type = Object)]
    pub meal_pass_id: Ref<PassRef>,
    pub meal_type: String,
    pub status: String,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CheckInOut {
    fn new(c: CheckIn, user: Ref<UserRef>, pass: Ref<PassRef>) -> Self {
        Self {
            id: c.id,
            record_id: c.id,
            user_id: user,
            mess_id: c.mess_id,
            meal_pass_id: pass,
            meal_type: c.meal_type.as_str().to_string(),
            status: c.status.as_str().to_string(),
            failure_reason: c.failure_reason,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<CheckInEntryDto> for CheckInOut {
    fn from(d: CheckInEntryDto) -> Self {
        let user = Ref::resolve(d.check_in.user_id, d.user.as_ref().map(UserRef::with_email));
        let pass = Ref::resolve(
            d.check_in.meal_pass_id,
            d.plan.map(|p| PassRef {
                id: p.meal_pass_id,
                subscription_id: SubscriptionPlanRef {
                    id: p.subscription_id,
                    plan_id: PlanBrief::name_only(&p.plan),
                },
            }),
        );
        CheckInOut::new(d.check_in, user, pass)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodayStatsOut {
    pub breakfast: i64,
    pub lunch: i64,
    pub dinner: i64,
}

impl From<MealTally> for TodayStatsOut {
    fn from(t: MealTally) -> Self {
        Self {
            breakfast: t.breakfast,
            lunch: t.lunch,
            dinner: t.dinner,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/today-stats/:mess_id", get(today_stats))
        .route("/:mess_id", get(list_check_ins).post(record_check_in))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/checkin/{mess_id}", tag = "Check-ins", request_body = CheckInBody,
    params(("mess_id" = Uuid, Path, description = "Scanning mess owner")),
    responses(
        (status = 201, body = CheckInOut),
        (status = 400, body = crate::presentation::http::error::ErrorBody),
        (status = 403, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn record_check_in(
    State(ctx): State<AppContext>,
    Path(mess_id): Path<Uuid>,
    Json(body): Json<CheckInBody>,
) -> ApiResult<(StatusCode, Json<CheckInOut>)> {
    let meal = meal_type(&body.meal_type)?;
    let passes = ctx.meal_pass_repo();
    let subscriptions = ctx.subscription_repo();
    let check_ins = ctx.check_in_repo();
    let uc = RecordCheckIn {
        passes: passes.as_ref(),
        subscriptions: subscriptions.as_ref(),
        check_ins: check_ins.as_ref(),
    };
    let created = uc.execute(mess_id, body.meal_pass_id, meal).await?;
    let (user, pass) = (Ref::Id(created.user_id), Ref::Id(created.meal_pass_id));
    Ok((StatusCode::CREATED, Json(CheckInOut::new(created, user, pass))))
}

#[utoipa::path(get, path = "/api/checkin/{mess_id}", tag = "Check-ins",
    params(("mess_id" = Uuid, Path, description = "Mess owner account id"), CheckInQuery),
    responses((status = 200, body = [CheckInOut]), (status = 400, body = crate::presentation::http::error::ErrorBody)))]
pub async fn list_check_ins(
    State(ctx): State<AppContext>,
    Path(mess_id): Path<Uuid>,
    Query(q): Query<CheckInQuery>,
) -> ApiResult<Json<Vec<CheckInOut>>> {
    let filter = q.into_filter()?;
    let check_ins = ctx.check_in_repo();
    let users = ctx.user_repo();
    let passes = ctx.meal_pass_repo();
    let subscriptions = ctx.subscription_repo();
    let plans = ctx.plan_repo();
    let uc = ListCheckIns {
        check_ins: check_ins.as_ref(),
        users: users.as_ref(),
        passes: passes.as_ref(),
        subscriptions: subscriptions.as_ref(),
        plans: plans.as_ref(),
    };
    let rows = uc.execute(mess_id, &filter).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/checkin/today-stats/{mess_id}", tag = "Check-ins",
    params(("mess_id" = Uuid, Path, description = "Mess owner account id")),
    responses((status = 200, body = TodayStatsOut)))]
pub async fn today_stats(
    State(ctx): State<AppContext>,
    Path(mess_id): Path<Uuid>,
) -> ApiResult<Json<TodayStatsOut>> {
    let repo = ctx.check_in_repo();
    let uc = TodayStats {
        repo: repo.as_ref(),
    };
    let tally = uc.execute(mess_id).await?;
    Ok(Json(tally.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::plan_repository::PlanRepository;
    use crate::application::use_cases::subscriptions::subscribe::Subscribe;
    use crate::domain::meal_pass::MealPass;
    use crate::domain::subscriptions::{NewPlan, PlanDuration, PlanMealType, SubscriptionStatus};
    use crate::domain::users::LoginRole;
    use crate::testing::{MemoryStore, seed_user, test_context};

    async fn active_pass(store: &MemoryStore) -> MealPass {
        let owner = seed_user(store, "owner", LoginRole::MessOwner).await;
        let diner = seed_user(store, "diner", LoginRole::User).await;
        let plan = PlanRepository::create(
            store,
            &NewPlan {
                owner_id: owner.id,
                plan_name: "Daily".into(),
                duration: PlanDuration::Daily,
                meal_type: PlanMealType::NonVeg,
                price: 120.0,
                description: "Three meals".into(),
            },
        )
        .await
        .unwrap();
        let uc = Subscribe {
            users: store,
            plans: store,
            subscriptions: store,
            passes: store,
        };
        let sub = uc.execute(diner.id, plan.id).await.unwrap();
        store.update_subscription(sub.id, |s| s.status = SubscriptionStatus::Active);
        store.passes().remove(0)
    }

    #[test]
    fn query_parsing() {
        let filter = CheckInQuery {
            user_id: Some(String::new()),
            date: Some("2024-03-01T18:30:00Z".into()),
            meal_type: Some("Dinner".into()),
        }
        .into_filter()
        .unwrap();
        assert!(filter.user_id.is_none());
        assert_eq!(filter.served_on.unwrap().to_string(), "2024-03-01");
        assert_eq!(filter.meal_type, Some(MealType::Dinner));

        let err = CheckInQuery {
            date: Some("last tuesday".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid date");
    }

    #[tokio::test]
    async fn one_check_in_per_meal_per_day() {
        let store = Arc::new(MemoryStore::default());
        let pass = active_pass(&store).await;
        let ctx = test_context(store);

        let body = || CheckInBody {
            meal_pass_id: pass.id,
            meal_type: "LUNCH".into(),
        };
        let (status, Json(first)) = record_check_in(State(ctx.clone()), Path(pass.owner_id), Json(body()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first.meal_type, "lunch");

        let err = record_check_in(State(ctx.clone()), Path(pass.owner_id), Json(body()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Already checked in for this meal today");

        let Json(stats) = today_stats(State(ctx.clone()), Path(pass.owner_id))
            .await
            .unwrap();
        assert_eq!((stats.breakfast, stats.lunch, stats.dinner), (0, 1, 0));

        let Json(list) = list_check_ins(
            State(ctx),
            Path(pass.owner_id),
            Query(CheckInQuery {
                meal_type: Some("lunch".into()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["userId"]["username"], "diner");
        assert_eq!(json[0]["mealPassId"]["subscriptionId"]["planId"]["planName"], "Daily");
    }

    #[tokio::test]
    async fn unknown_meal_type_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let ctx = test_context(store);
        let err = record_check_in(
            State(ctx),
            Path(Uuid::new_v4()),
            Json(CheckInBody {
                meal_pass_id: Uuid::new_v4(),
                meal_type: "brunch".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid meal type");
    }
}
