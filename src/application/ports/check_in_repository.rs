use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::check_in::{CheckIn, CheckInFilter, MealTally, MealType, NewCheckIn};

#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Returns `None` when the pass was already used for this meal on that day.
    async fn create(&self, check_in: &NewCheckIn) -> anyhow::Result<Option<CheckIn>>;
    async fn exists_for_day(
        &self,
        meal_pass_id: Uuid,
        meal_type: MealType,
        day: NaiveDate,
    ) -> anyhow::Result<bool>;
    /// Newest first.
    async fn list(&self, mess_id: Uuid, filter: &CheckInFilter) -> anyhow::Result<Vec<CheckIn>>;
    /// Successful check-ins per meal for the mess on `day`.
    async fn tally_successful(&self, mess_id: Uuid, day: NaiveDate) -> anyhow::Result<MealTally>;
}
