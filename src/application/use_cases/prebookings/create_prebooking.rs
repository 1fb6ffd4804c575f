use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::prebooking_repository::PrebookingRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::prebooking::{NewPrebooking, Prebooking};

pub struct CreatePrebooking<'a, U, M, P>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
    P: PrebookingRepository + ?Sized,
{
    pub users: &'a U,
    pub messes: &'a M,
    pub prebookings: &'a P,
}

impl<'a, U, M, P> CreatePrebooking<'a, U, M, P>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
    P: PrebookingRepository + ?Sized,
{
    pub async fn execute(&self, req: &NewPrebooking) -> ServiceResult<Prebooking> {
        if req.quantity < 1 {
            return Err(ServiceError::invalid("Quantity must be at least 1"));
        }
        if self.users.find_by_id(req.user_id).await?.is_none() {
            return Err(ServiceError::not_found("User"));
        }
        if self.messes.find_by_id(req.mess_id).await?.is_none() {
            return Err(ServiceError::not_found("Mess"));
        }
        Ok(self.prebookings.create(req).await?)
    }
}
