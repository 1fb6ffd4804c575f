use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::prebooking_repository::PrebookingRepository;
use crate::domain::prebooking::{Prebooking, PrebookingStatus};

pub struct UpdatePrebookingStatus<'a, R: PrebookingRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PrebookingRepository + ?Sized> UpdatePrebookingStatus<'a, R> {
    pub async fn execute(&self, id: Uuid, status: PrebookingStatus) -> ServiceResult<Prebooking> {
        self.repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| ServiceError::not_found("Prebooking"))
    }
}

pub struct DeletePrebooking<'a, R: PrebookingRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PrebookingRepository + ?Sized> DeletePrebooking<'a, R> {
    pub async fn execute(&self, id: Uuid) -> ServiceResult<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Prebooking"))
        }
    }
}
