use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::use_cases::menus::create_menu::{CreateMenu, CreateMenuRequest};
use crate::application::use_cases::menus::delete_menu::DeleteMenu;
use crate::application::use_cases::menus::list_menus::ListMenus;
use crate::application::use_cases::menus::update_menu::UpdateMenu;
use crate::bootstrap::app_context::AppContext;
use crate::domain::menu::{Availability, FoodType, Menu, MenuPatch};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::wire::SuccessMessage;

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    #[serde(rename = "Menu_Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Owner_ID")]
    pub owner_id: Uuid,
    #[serde(rename = "Availability")]
    pub availability: String,
    #[serde(rename = "Food_Type")]
    pub food_type: String,
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
}

impl From<&Menu> for MenuOut {
    fn from(m: &Menu) -> Self {
        Self {
            id: m.id,
            record_id: m.id,
            name: m.name.clone(),
            description: m.description.clone(),
            price: m.price,
            owner_id: m.owner_id,
            availability: m.availability.as_str().to_string(),
            food_type: m.food_type.as_str().to_string(),
            date: m.date,
        }
    }
}

fn default_availability() -> Availability {
    Availability::Yes
}

fn default_food_type() -> FoodType {
    FoodType::Veg
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMenuBody {
    #[serde(rename = "Menu_Name", default)]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Availability", default = "default_availability")]
    #[schema(value_type = String, example = "Yes")]
    pub availability: Availability,
    #[serde(rename = "Food_Type", default = "default_food_type")]
    #[schema(value_type = String, example = "Veg")]
    pub food_type: FoodType,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMenuBody {
    #[serde(rename = "Menu_Name")]
    pub name: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
    #[serde(rename = "Availability")]
    #[schema(value_type = Option<String>)]
    pub availability: Option<Availability>,
    #[serde(rename = "Food_Type")]
    #[schema(value_type = Option<String>)]
    pub food_type: Option<FoodType>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub menus: Vec<MenuOut>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuResponse {
    pub success: bool,
    pub message: String,
    pub menu: MenuOut,
}

fn listing(menus: &[Menu], success: Option<bool>) -> Json<MenusResponse> {
    Json(MenusResponse {
        success,
        menus: menus.iter().map(MenuOut::from).collect(),
    })
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_all))
        .route("/create/:owner_id", post(create_menu))
        .route("/search/:owner_id", get(search_menus))
        .route("/update/:menu_id", put(update_menu))
        .route("/delete/:menu_id", delete(delete_menu))
        .route("/:owner_id", get(list_by_owner))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/menu/create/{owner_id}", tag = "Menus", request_body = CreateMenuBody,
    params(("owner_id" = Uuid, Path, description = "Owner account id")),
    responses((status = 200, body = MenuResponse), (status = 400, body = crate::presentation::http::error::ErrorBody)))]
pub async fn create_menu(
    State(ctx): State<AppContext>,
    Path(owner_id): Path<Uuid>,
    Json(body): Json<CreateMenuBody>,
) -> ApiResult<Json<MenuResponse>> {
    let users = ctx.user_repo();
    let menus = ctx.menu_repo();
    let uc = CreateMenu {
        users: users.as_ref(),
        menus: menus.as_ref(),
    };
    let menu = uc
        .execute(
            owner_id,
            CreateMenuRequest {
                name: body.name,
                description: body.description,
                price: body.price,
                availability: body.availability,
                food_type: body.food_type,
            },
        )
        .await?;
    Ok(Json(MenuResponse {
        success: true,
        message: "Menu created successfully".into(),
        menu: MenuOut::from(&menu),
    }))
}

#[utoipa::path(get, path = "/api/menu", tag = "Menus", responses((status = 200, body = MenusResponse)))]
pub async fn list_all(State(ctx): State<AppContext>) -> ApiResult<Json<MenusResponse>> {
    let repo = ctx.menu_repo();
    let uc = ListMenus {
        repo: repo.as_ref(),
    };
    let menus = uc.all().await?;
    Ok(listing(&menus, None))
}

#[utoipa::path(get, path = "/api/menu/{owner_id}", tag = "Menus",
    params(("owner_id" = Uuid, Path, description = "Owner account id")),
    responses((status = 200, body = MenusResponse)))]
pub async fn list_by_owner(
    State(ctx): State<AppContext>,
    Path(owner_id): Path<Uuid>,
) -> ApiResult<Json<MenusResponse>> {
    let repo = ctx.menu_repo();
    let uc = ListMenus {
        repo: repo.as_ref(),
    };
    let menus = uc.by_owner(owner_id).await?;
    Ok(listing(&menus, Some(true)))
}

#[utoipa::path(get, path = "/api/menu/search/{owner_id}", tag = "Menus",
    params(("owner_id" = Uuid, Path, description = "Owner account id"), SearchQuery),
    responses((status = 200, body = MenusResponse)))]
pub async fn search_menus(
    State(ctx): State<AppContext>,
    Path(owner_id): Path<Uuid>,
    Query(q): Query<SearchQuery>,
) -> ApiResult<Json<MenusResponse>> {
    let repo = ctx.menu_repo();
    let uc = ListMenus {
        repo: repo.as_ref(),
    };
    let menus = uc.search(owner_id, q.query.as_deref()).await?;
    Ok(listing(&menus, Some(true)))
}

#[utoipa::path(put, path = "/api/menu/update/{menu_id}", tag = "Menus", request_body = UpdateMenuBody,
    params(("menu_id" = Uuid, Path, description = "Menu id")),
    responses((status = 200, body = MenuResponse), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn update_menu(
    State(ctx): State<AppContext>,
    Path(menu_id): Path<Uuid>,
    Json(body): Json<UpdateMenuBody>,
) -> ApiResult<Json<MenuResponse>> {
    let repo = ctx.menu_repo();
    let uc = UpdateMenu {
        repo: repo.as_ref(),
    };
    let patch = MenuPatch {
        name: body.name,
        description: body.description,
        price: body.price,
        availability: body.availability,
        food_type: body.food_type,
    };
    let menu = uc.execute(menu_id, patch).await?;
    Ok(Json(MenuResponse {
        success: true,
        message: "Menu updated successfully".into(),
        menu: MenuOut::from(&menu),
    }))
}

#[utoipa::path(delete, path = "/api/menu/delete/{menu_id}", tag = "Menus",
    params(("menu_id" = Uuid, Path, description = "Menu id")),
    responses((status = 200, body = SuccessMessage), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn delete_menu(
    State(ctx): State<AppContext>,
    Path(menu_id): Path<Uuid>,
) -> ApiResult<Json<SuccessMessage>> {
    let repo = ctx.menu_repo();
    let uc = DeleteMenu {
        repo: repo.as_ref(),
    };
    uc.execute(menu_id).await?;
    Ok(Json(SuccessMessage::new("Menu deleted successfully")))
}
