use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::menu_repository::MenuRepository;
use crate::application::use_cases::menus::create_menu::check_price;
use crate::domain::menu::{Menu, MenuPatch};

pub struct UpdateMenu<'a, R: MenuRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MenuRepository + ?Sized> UpdateMenu<'a, R> {
    pub async fn execute(&self, id: Uuid, patch: MenuPatch) -> ServiceResult<Menu> {
        if let Some(price) = patch.price {
            check_price(price)?;
        }
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ServiceError::invalid("Menu name is required"));
        }
        let mut menu = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Menu"))?;
        patch.apply(&mut menu);
        Ok(self.repo.save(&menu).await?)
    }
}
