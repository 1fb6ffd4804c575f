use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::menu_repository::MenuRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::menu::{Availability, FoodType, Menu, NewMenu};

pub struct CreateMenu<'a, U, M>
where
    U: UserRepository + ?Sized,
    M: MenuRepository + ?Sized,
{
    pub users: &'a U,
    pub menus: &'a M,
}

#[derive(Debug, Clone)]
pub struct CreateMenuRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub availability: Availability,
    pub food_type: FoodType,
}

pub(crate) fn check_price(price: f64) -> ServiceResult<()> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(ServiceError::invalid("Price must be greater than 0"))
    }
}

impl<'a, U, M> CreateMenu<'a, U, M>
where
    U: UserRepository + ?Sized,
    M: MenuRepository + ?Sized,
{
    pub async fn execute(&self, owner_id: Uuid, req: CreateMenuRequest) -> ServiceResult<Menu> {
        if req.name.trim().is_empty() {
            return Err(ServiceError::invalid("Menu name is required"));
        }
        check_price(req.price)?;
        if self.users.find_by_id(owner_id).await?.is_none() {
            return Err(ServiceError::not_found("User"));
        }
        let menu = self
            .menus
            .create(&NewMenu {
                name: req.name,
                description: req.description,
                price: req.price,
                owner_id,
                availability: req.availability,
                food_type: req.food_type,
            })
            .await?;
        Ok(menu)
    }
}
