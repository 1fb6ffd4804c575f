use crate::application::errors::ServiceResult;
use crate::application::ports::mess_repository::MessRepository;
use crate::domain::mess::{Mess, overall_average};

pub const LIST_LIMIT: i64 = 100;

pub struct ListMesses<'a, R: MessRepository + ?Sized> {
    pub repo: &'a R,
}

pub struct MessListing {
    pub messes: Vec<Mess>,
    pub avg_rating: f64,
}

impl<'a, R: MessRepository + ?Sized> ListMesses<'a, R> {
    pub async fn execute(&self) -> ServiceResult<MessListing> {
        let messes = self.repo.list(LIST_LIMIT).await?;
        let avg_rating = overall_average(&messes);
        Ok(MessListing { messes, avg_rating })
    }
}
