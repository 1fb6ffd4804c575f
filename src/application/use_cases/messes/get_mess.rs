use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::mess_repository::MessRepository;
use crate::domain::mess::Mess;

pub struct GetMess<'a, R: MessRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MessRepository + ?Sized> GetMess<'a, R> {
    pub async fn by_id(&self, id: Uuid) -> ServiceResult<Mess> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mess"))
    }

    pub async fn by_owner(&self, owner_id: Uuid) -> ServiceResult<Mess> {
        self.repo
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mess"))
    }
}
