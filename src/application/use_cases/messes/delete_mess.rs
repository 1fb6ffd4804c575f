use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::mess_repository::MessRepository;

pub struct DeleteMess<'a, R: MessRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MessRepository + ?Sized> DeleteMess<'a, R> {
    pub async fn by_owner(&self, owner_id: Uuid) -> ServiceResult<()> {
        let mess = self
            .repo
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mess"))?;
        self.repo.delete(mess.id).await?;
        Ok(())
    }

    pub async fn owned(&self, mess_id: Uuid, actor_id: Uuid) -> ServiceResult<()> {
        let mess = self
            .repo
            .find_by_id(mess_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mess"))?;
        if mess.owner_id != actor_id {
            return Err(ServiceError::forbidden("You can only delete your own mess"));
        }
        self.repo.delete(mess.id).await?;
        Ok(())
    }
}
