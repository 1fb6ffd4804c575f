use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::prebookings::create_prebooking::CreatePrebooking;
use crate::application::use_cases::prebookings::list_prebookings::ListPrebookings;
use crate::application::use_cases::prebookings::update_prebooking::{
    DeletePrebooking, UpdatePrebookingStatus,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::prebooking::{NewPrebooking, Prebooking, PrebookingStatus};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::wire::{Message, MessBrief, Ref, UserRef};

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrebookingBody {
    pub menu_id: Uuid,
    pub mess_id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusBody {
    #[schema(value_type = String, example = "Confirmed")]
    pub status: PrebookingStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrebookingOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    pub menu_id: Uuid,
    #[schema(value_type = Object)]
    pub mess_id: Ref<MessBrief>,
    #[schema(value_type = Object)]
    pub user_id: Ref<UserRef>,
    pub date: String,
    pub time: String,
    pub quantity: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrebookingOut {
    fn new(p: Prebooking, mess: Ref<MessBrief>, user: Ref<UserRef>) -> Self {
        Self {
            id: p.id,
            record_id: p.id,
            menu_id: p.menu_id,
            mess_id: mess,
            user_id: user,
            date: p.date,
            time: p.time,
            quantity: p.quantity,
            status: p.status.as_str().to_string(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<Prebooking> for PrebookingOut {
    fn from(p: Prebooking) -> Self {
        let (mess, user) = (Ref::Id(p.mess_id), Ref::Id(p.user_id));
        Self::new(p, mess, user)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrebookingResponse {
    pub message: String,
    pub prebooking: PrebookingOut,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrebookingList {
    pub prebooking: Vec<PrebookingOut>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_all).post(create_prebooking))
        .route("/mess/:mess_id", get(list_for_mess))
        .route(
            "/:id",
            get(list_for_user)
                .patch(update_status)
                .delete(delete_prebooking),
        )
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/prebooking", tag = "Prebookings", request_body = CreatePrebookingBody, responses(
    (status = 200, body = PrebookingResponse),
    (status = 404, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn create_prebooking(
    State(ctx): State<AppContext>,
    Json(body): Json<CreatePrebookingBody>,
) -> ApiResult<Json<PrebookingResponse>> {
    let users = ctx.user_repo();
    let messes = ctx.mess_repo();
    let prebookings = ctx.prebooking_repo();
    let uc = CreatePrebooking {
        users: users.as_ref(),
        messes: messes.as_ref(),
        prebookings: prebookings.as_ref(),
    };
    let created = uc
        .execute(&NewPrebooking {
            menu_id: body.menu_id,
            mess_id: body.mess_id,
            user_id: body.user_id,
            date: body.date,
            time: body.time,
            quantity: body.quantity,
        })
        .await?;
    info!(prebooking_id = %created.id, mess_id = %created.mess_id, "prebooking_created");
    Ok(Json(PrebookingResponse {
        message: "Prebooking created successfully".into(),
        prebooking: created.into(),
    }))
}

#[utoipa::path(get, path = "/api/prebooking", tag = "Prebookings", responses((status = 200, body = PrebookingList)))]
pub async fn list_all(State(ctx): State<AppContext>) -> ApiResult<Json<PrebookingList>> {
    let users = ctx.user_repo();
    let messes = ctx.mess_repo();
    let prebookings = ctx.prebooking_repo();
    let uc = ListPrebookings {
        users: users.as_ref(),
        messes: messes.as_ref(),
        prebookings: prebookings.as_ref(),
    };
    let rows = uc.all().await?;
    Ok(Json(PrebookingList {
        prebooking: rows.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/prebooking/{id}", tag = "Prebookings",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, body = [PrebookingOut])))]
pub async fn list_for_user(
    State(ctx): State<AppContext>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<PrebookingOut>>> {
    let users = ctx.user_repo();
    let messes = ctx.mess_repo();
    let prebookings = ctx.prebooking_repo();
    let uc = ListPrebookings {
        users: users.as_ref(),
        messes: messes.as_ref(),
        prebookings: prebookings.as_ref(),
    };
    let rows = uc.for_user(user_id).await?;
    let out = rows
        .into_iter()
        .map(|row| {
            let mess = Ref::resolve(
                row.prebooking.mess_id,
                row.mess.as_ref().map(MessBrief::pictured),
            );
            let user = Ref::Id(row.prebooking.user_id);
            PrebookingOut::new(row.prebooking, mess, user)
        })
        .collect();
    Ok(Json(out))
}

#[utoipa::path(get, path = "/api/prebooking/mess/{mess_id}", tag = "Prebookings",
    params(("mess_id" = Uuid, Path, description = "Mess id")),
    responses((status = 200, body = [PrebookingOut])))]
pub async fn list_for_mess(
    State(ctx): State<AppContext>,
    Path(mess_id): Path<Uuid>,
) -> ApiResult<Json<Vec<PrebookingOut>>> {
    let users = ctx.user_repo();
    let messes = ctx.mess_repo();
    let prebookings = ctx.prebooking_repo();
    let uc = ListPrebookings {
        users: users.as_ref(),
        messes: messes.as_ref(),
        prebookings: prebookings.as_ref(),
    };
    let rows = uc.for_mess(mess_id).await?;
    let out = rows
        .into_iter()
        .map(|row| {
            let user = Ref::resolve(
                row.prebooking.user_id,
                row.user.as_ref().map(UserRef::with_email),
            );
            let mess = Ref::Id(row.prebooking.mess_id);
            PrebookingOut::new(row.prebooking, mess, user)
        })
        .collect();
    Ok(Json(out))
}

#[utoipa::path(patch, path = "/api/prebooking/{id}", tag = "Prebookings", request_body = StatusBody,
    params(("id" = Uuid, Path, description = "Prebooking id")),
    responses((status = 200, body = PrebookingResponse), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn update_status(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> ApiResult<Json<PrebookingResponse>> {
    let repo = ctx.prebooking_repo();
    let uc = UpdatePrebookingStatus {
        repo: repo.as_ref(),
    };
    let updated = uc.execute(id, body.status).await?;
    info!(prebooking_id = %id, status = %updated.status, "prebooking_status_changed");
    Ok(Json(PrebookingResponse {
        message: "Prebooking status updated successfully".into(),
        prebooking: updated.into(),
    }))
}

#[utoipa::path(delete, path = "/api/prebooking/{id}", tag = "Prebookings",
    params(("id" = Uuid, Path, description = "Prebooking id")),
    responses((status = 200, body = Message), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn delete_prebooking(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Message>> {
    let repo = ctx.prebooking_repo();
    let uc = DeletePrebooking {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(Json(Message::new("Prebooking deleted successfully")))
}
