use uuid::Uuid;

use crate::application::dto::prebookings::{PrebookingWithMessDto, PrebookingWithUserDto};
use crate::application::errors::ServiceResult;
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::prebooking_repository::PrebookingRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::prebooking::Prebooking;

pub struct ListPrebookings<'a, U, M, P>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
    P: PrebookingRepository + ?Sized,
{
    pub users: &'a U,
    pub messes: &'a M,
    pub prebookings: &'a P,
}

impl<'a, U, M, P> ListPrebookings<'a, U, M, P>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
    P: PrebookingRepository + ?Sized,
{
    pub async fn all(&self) -> ServiceResult<Vec<Prebooking>> {
        Ok(self.prebookings.list_all().await?)
    }

    pub async fn for_user(&self, user_id: Uuid) -> ServiceResult<Vec<PrebookingWithMessDto>> {
        let rows = self.prebookings.list_by_user(user_id).await?;
        let mut out = Vec::with_capacity(rows.len());
        for prebooking in rows {
            let mess = self.messes.find_by_id(prebooking.mess_id).await?;
            out.push(PrebookingWithMessDto { prebooking, mess });
        }
        Ok(out)
    }

    pub async fn for_mess(&self, mess_id: Uuid) -> ServiceResult<Vec<PrebookingWithUserDto>> {
        let rows = self.prebookings.list_by_mess(mess_id).await?;
        let mut out = Vec::with_capacity(rows.len());
        for prebooking in rows {
            let user = self.users.find_by_id(prebooking.user_id).await?;
            out.push(PrebookingWithUserDto { prebooking, user });
        }
        Ok(out)
    }
}
