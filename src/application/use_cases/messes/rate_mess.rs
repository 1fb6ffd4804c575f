use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::mess_repository::MessRepository;
use crate::domain::mess::{Mess, is_valid_rating};

pub struct RateMess<'a, R: MessRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MessRepository + ?Sized> RateMess<'a, R> {
    /// Records a user's one rating of the mess and returns the refreshed mess.
    pub async fn execute(&self, mess_id: Uuid, user_id: Uuid, rating: i32) -> ServiceResult<Mess> {
        if !is_valid_rating(rating) {
            return Err(ServiceError::invalid("Rating must be between 1 and 5"));
        }
        let mess = self
            .repo
            .find_by_id(mess_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mess"))?;
        if mess.rating_by(user_id).is_some() || !self.repo.add_rating(mess.id, user_id, rating).await? {
            return Err(ServiceError::invalid("You have already rated this mess"));
        }
        self.repo
            .find_by_id(mess_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mess"))
    }

    /// The user's rating of the mess, if they gave one.
    pub async fn rating_of(&self, mess_id: Uuid, user_id: Uuid) -> ServiceResult<Option<i32>> {
        let mess = self
            .repo
            .find_by_id(mess_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mess"))?;
        Ok(mess.rating_by(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::LoginRole;
    use crate::testing::{MemoryStore, seed_mess, seed_user};

    #[tokio::test]
    async fn one_rating_per_user() {
        let store = MemoryStore::default();
        let owner = seed_user(&store, "owner", LoginRole::MessOwner).await;
        let mess = seed_mess(&store, &owner, "Golden").await;
        let uc = RateMess { repo: &store };
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let rated = uc.execute(mess.id, a, 5).await.unwrap();
        assert_eq!(rated.average_rating(), 5.0);
        let rated = uc.execute(mess.id, b, 2).await.unwrap();
        assert_eq!(rated.average_rating(), 3.5);
        assert_eq!(rated.total_ratings(), 2);

        let err = uc.execute(mess.id, a, 4).await.unwrap_err();
        assert_eq!(err.to_string(), "You have already rated this mess");
        assert_eq!(uc.rating_of(mess.id, a).await.unwrap(), Some(5));
        assert_eq!(uc.rating_of(mess.id, Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn out_of_range_rating() {
        let store = MemoryStore::default();
        let uc = RateMess { repo: &store };
        let err = uc.execute(Uuid::new_v4(), Uuid::new_v4(), 6).await.unwrap_err();
        assert_eq!(err.to_string(), "Rating must be between 1 and 5");
    }
}
