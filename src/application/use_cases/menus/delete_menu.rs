use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::menu_repository::MenuRepository;

pub struct DeleteMenu<'a, R: MenuRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MenuRepository + ?Sized> DeleteMenu<'a, R> {
    pub async fn execute(&self, id: Uuid) -> ServiceResult<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Menu"))
        }
    }
}
