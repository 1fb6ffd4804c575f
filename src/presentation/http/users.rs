use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::application::use_cases::users::delete_account::DeleteAccount;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::update_profile::{
    UpdateProfile, UpdateProfileRequest as UpdateProfileDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{CurrentUser, clear_cookie_headers};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::wire::{SuccessMessage, UserOut};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/profile",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/signout", post(signout))
        .route("/:user_id", get(get_user))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/user/profile", tag = "Users", responses(
    (status = 200, body = UserOut),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<UserOut> {
    Json(UserOut::from(&user))
}

#[utoipa::path(put, path = "/api/user/profile", tag = "Users", request_body = UpdateProfileRequest,
    responses((status = 200, body = UserOut)))]
pub async fn update_profile(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserOut>> {
    let repo = ctx.user_repo();
    let uc = UpdateProfile {
        repo: repo.as_ref(),
    };
    let updated = uc
        .execute(
            user.id,
            &UpdateProfileDto {
                username: req.username,
                email: req.email,
            },
        )
        .await?;
    Ok(Json(UserOut::from(&updated)))
}

#[utoipa::path(delete, path = "/api/user/profile", tag = "Users", responses((status = 200, body = SuccessMessage)))]
pub async fn delete_profile(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<(HeaderMap, Json<SuccessMessage>)> {
    let repo = ctx.user_repo();
    let uc = DeleteAccount {
        repo: repo.as_ref(),
    };
    uc.execute(user.id).await?;
    info!(user_id = %user.id, "account_deleted");
    Ok((
        clear_cookie_headers(&ctx.cfg),
        Json(SuccessMessage::new("Account deleted successfully")),
    ))
}

#[utoipa::path(get, path = "/api/user/{user_id}", tag = "Users",
    params(("user_id" = String, Path, description = "Account UUID or numeric UserID")),
    responses((status = 200, body = UserOut), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    _auth: CurrentUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserOut>> {
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    let user = uc.by_key(&user_id).await?;
    Ok(Json(UserOut::from(&user)))
}

#[utoipa::path(post, path = "/api/user/signout", tag = "Users", responses((status = 200, body = SuccessMessage)))]
pub async fn signout(State(ctx): State<AppContext>) -> (HeaderMap, Json<SuccessMessage>) {
    (
        clear_cookie_headers(&ctx.cfg),
        Json(SuccessMessage::new("User has been signed out")),
    )
}
