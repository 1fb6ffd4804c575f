use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::messes::create_mess::{CreateMess, CreateMessRequest};
use crate::application::use_cases::messes::delete_mess::DeleteMess;
use crate::application::use_cases::messes::get_mess::GetMess;
use crate::application::use_cases::messes::list_messes::ListMesses;
use crate::application::use_cases::messes::rate_mess::RateMess;
use crate::application::use_cases::messes::update_mess::UpdateMess;
use crate::bootstrap::app_context::AppContext;
use crate::domain::mess::MessPatch;
use crate::presentation::http::auth::MessOwner;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::wire::{MessOut, SuccessMessage};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMessBody {
    #[serde(rename = "Mess_Name", default)]
    pub name: String,
    #[serde(rename = "Mobile_No")]
    pub mobile_no: Option<String>,
    #[serde(rename = "Capacity")]
    pub capacity: Option<i32>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Image")]
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMessBody {
    #[serde(rename = "Mess_Name")]
    pub name: Option<String>,
    #[serde(rename = "Mobile_No")]
    pub mobile_no: Option<String>,
    #[serde(rename = "Capacity")]
    pub capacity: Option<i32>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Image")]
    pub image: Option<String>,
}

impl From<UpdateMessBody> for MessPatch {
    fn from(b: UpdateMessBody) -> Self {
        MessPatch {
            name: b.name,
            mobile_no: b.mobile_no,
            capacity: b.capacity,
            address: b.address,
            description: b.description,
            image: b.image,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RatingBody {
    pub rating: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessListResponse {
    pub success: bool,
    pub messes: Vec<MessOut>,
    pub avg_rating: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub mess: MessOut,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub rating: f64,
    pub total_ratings: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HasRatedResponse {
    pub success: bool,
    pub has_rated: bool,
    pub rating: i32,
}

fn mess_response(mess: &crate::domain::mess::Mess, message: Option<&str>) -> Json<MessResponse> {
    Json(MessResponse {
        success: true,
        message: message.map(str::to_string),
        mess: MessOut::from(mess),
    })
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_messes))
        .route("/create/:owner_id", post(create_mess))
        .route("/my-mess", get(my_mess))
        .route("/read/:mess_id", get(read_mess))
        .route("/update/:owner_id", put(update_by_owner))
        .route("/delete/:owner_id", axum::routing::delete(delete_by_owner))
        .route("/rating/:mess_id", get(get_rating))
        .route("/rating/:mess_id/:user_id", put(rate_mess))
        .route("/hasrated/:mess_id/:user_id", get(has_rated))
        .route(
            "/:id",
            get(get_by_owner).put(update_owned).delete(delete_owned),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/mess", tag = "Messes", responses((status = 200, body = MessListResponse)))]
pub async fn list_messes(State(ctx): State<AppContext>) -> ApiResult<Json<MessListResponse>> {
    let repo = ctx.mess_repo();
    let uc = ListMesses {
        repo: repo.as_ref(),
    };
    let listing = uc.execute().await?;
    Ok(Json(MessListResponse {
        success: true,
        messes: listing.messes.iter().map(MessOut::from).collect(),
        avg_rating: listing.avg_rating,
    }))
}

#[utoipa::path(post, path = "/api/mess/create/{owner_id}", tag = "Messes", request_body = CreateMessBody,
    params(("owner_id" = Uuid, Path, description = "Owner account id")),
    responses((status = 200, body = MessResponse), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn create_mess(
    State(ctx): State<AppContext>,
    Path(owner_id): Path<Uuid>,
    Json(body): Json<CreateMessBody>,
) -> ApiResult<Json<MessResponse>> {
    let users = ctx.user_repo();
    let messes = ctx.mess_repo();
    let uc = CreateMess {
        users: users.as_ref(),
        messes: messes.as_ref(),
    };
    let mess = uc
        .execute(
            owner_id,
            CreateMessRequest {
                name: body.name,
                mobile_no: body.mobile_no,
                capacity: body.capacity,
                address: body.address,
                description: body.description,
                image: body.image,
            },
        )
        .await?;
    info!(mess_id = %mess.id, owner_id = %owner_id, "mess_created");
    Ok(mess_response(&mess, Some("Mess created successfully")))
}

#[utoipa::path(get, path = "/api/mess/{id}", tag = "Messes",
    params(("id" = Uuid, Path, description = "Owner account id")),
    responses((status = 200, body = MessResponse), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn get_by_owner(
    State(ctx): State<AppContext>,
    Path(owner_id): Path<Uuid>,
) -> ApiResult<Json<MessResponse>> {
    let repo = ctx.mess_repo();
    let uc = GetMess {
        repo: repo.as_ref(),
    };
    let mess = uc.by_owner(owner_id).await?;
    Ok(mess_response(&mess, None))
}

#[utoipa::path(get, path = "/api/mess/read/{mess_id}", tag = "Messes",
    params(("mess_id" = Uuid, Path, description = "Mess id")),
    responses((status = 200, body = MessResponse), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn read_mess(
    State(ctx): State<AppContext>,
    Path(mess_id): Path<Uuid>,
) -> ApiResult<Json<MessResponse>> {
    let repo = ctx.mess_repo();
    let uc = GetMess {
        repo: repo.as_ref(),
    };
    let mess = uc.by_id(mess_id).await?;
    Ok(mess_response(&mess, None))
}

#[utoipa::path(get, path = "/api/mess/my-mess", tag = "Messes", responses(
    (status = 200, body = MessResponse),
    (status = 403, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn my_mess(
    State(ctx): State<AppContext>,
    MessOwner(owner): MessOwner,
) -> ApiResult<Json<MessResponse>> {
    let repo = ctx.mess_repo();
    let uc = GetMess {
        repo: repo.as_ref(),
    };
    let mess = uc.by_owner(owner.id).await?;
    Ok(mess_response(&mess, None))
}

#[utoipa::path(put, path = "/api/mess/update/{owner_id}", tag = "Messes", request_body = UpdateMessBody,
    params(("owner_id" = Uuid, Path, description = "Owner account id")),
    responses((status = 200, body = MessResponse)))]
pub async fn update_by_owner(
    State(ctx): State<AppContext>,
    Path(owner_id): Path<Uuid>,
    Json(body): Json<UpdateMessBody>,
) -> ApiResult<Json<MessResponse>> {
    let repo = ctx.mess_repo();
    let uc = UpdateMess {
        repo: repo.as_ref(),
    };
    let mess = uc.by_owner(owner_id, body.into()).await?;
    Ok(mess_response(&mess, Some("Mess updated successfully")))
}

#[utoipa::path(put, path = "/api/mess/{id}", tag = "Messes", request_body = UpdateMessBody,
    params(("id" = Uuid, Path, description = "Mess id")),
    responses((status = 200, body = MessResponse), (status = 403, body = crate::presentation::http::error::ErrorBody)))]
pub async fn update_owned(
    State(ctx): State<AppContext>,
    MessOwner(owner): MessOwner,
    Path(mess_id): Path<Uuid>,
    Json(body): Json<UpdateMessBody>,
) -> ApiResult<Json<MessResponse>> {
    let repo = ctx.mess_repo();
    let uc = UpdateMess {
        repo: repo.as_ref(),
    };
    let mess = uc.owned(mess_id, owner.id, body.into()).await?;
    Ok(mess_response(&mess, Some("Mess updated successfully")))
}

#[utoipa::path(delete, path = "/api/mess/delete/{owner_id}", tag = "Messes",
    params(("owner_id" = Uuid, Path, description = "Owner account id")),
    responses((status = 200, body = SuccessMessage)))]
pub async fn delete_by_owner(
    State(ctx): State<AppContext>,
    Path(owner_id): Path<Uuid>,
) -> ApiResult<Json<SuccessMessage>> {
    let repo = ctx.mess_repo();
    let uc = DeleteMess {
        repo: repo.as_ref(),
    };
    uc.by_owner(owner_id).await?;
    info!(owner_id = %owner_id, "mess_deleted");
    Ok(Json(SuccessMessage::new("Mess deleted successfully")))
}

#[utoipa::path(delete, path = "/api/mess/{id}", tag = "Messes",
    params(("id" = Uuid, Path, description = "Mess id")),
    responses((status = 200, body = SuccessMessage), (status = 403, body = crate::presentation::http::error::ErrorBody)))]
pub async fn delete_owned(
    State(ctx): State<AppContext>,
    MessOwner(owner): MessOwner,
    Path(mess_id): Path<Uuid>,
) -> ApiResult<Json<SuccessMessage>> {
    let repo = ctx.mess_repo();
    let uc = DeleteMess {
        repo: repo.as_ref(),
    };
    uc.owned(mess_id, owner.id).await?;
    info!(mess_id = %mess_id, owner_id = %owner.id, "mess_deleted");
    Ok(Json(SuccessMessage::new("Mess deleted successfully")))
}

#[utoipa::path(get, path = "/api/mess/rating/{mess_id}", tag = "Messes",
    params(("mess_id" = Uuid, Path, description = "Mess id")),
    responses((status = 200, body = RatingResponse)))]
pub async fn get_rating(
    State(ctx): State<AppContext>,
    Path(mess_id): Path<Uuid>,
) -> ApiResult<Json<RatingResponse>> {
    let repo = ctx.mess_repo();
    let uc = GetMess {
        repo: repo.as_ref(),
    };
    let mess = uc.by_id(mess_id).await?;
    Ok(Json(RatingResponse {
        success: true,
        message: None,
        rating: mess.average_rating(),
        total_ratings: mess.total_ratings(),
    }))
}

#[utoipa::path(put, path = "/api/mess/rating/{mess_id}/{user_id}", tag = "Messes", request_body = RatingBody,
    params(
        ("mess_id" = Uuid, Path, description = "Mess id"),
        ("user_id" = Uuid, Path, description = "Rating user")
    ),
    responses((status = 200, body = RatingResponse), (status = 400, body = crate::presentation::http::error::ErrorBody)))]
pub async fn rate_mess(
    State(ctx): State<AppContext>,
    Path((mess_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<RatingBody>,
) -> ApiResult<Json<RatingResponse>> {
    let repo = ctx.mess_repo();
    let uc = RateMess {
        repo: repo.as_ref(),
    };
    let mess = uc.execute(mess_id, user_id, body.rating).await?;
    Ok(Json(RatingResponse {
        success: true,
        message: Some("Rating submitted successfully".to_string()),
        rating: mess.average_rating(),
        total_ratings: mess.total_ratings(),
    }))
}

#[utoipa::path(get, path = "/api/mess/hasrated/{mess_id}/{user_id}", tag = "Messes",
    params(
        ("mess_id" = Uuid, Path, description = "Mess id"),
        ("user_id" = Uuid, Path, description = "User to check")
    ),
    responses((status = 200, body = HasRatedResponse)))]
pub async fn has_rated(
    State(ctx): State<AppContext>,
    Path((mess_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<HasRatedResponse>> {
    let repo = ctx.mess_repo();
    let uc = RateMess {
        repo: repo.as_ref(),
    };
    let rating = uc.rating_of(mess_id, user_id).await?;
    Ok(Json(HasRatedResponse {
        success: true,
        has_rated: rating.is_some(),
        rating: rating.unwrap_or(0),
    }))
}
