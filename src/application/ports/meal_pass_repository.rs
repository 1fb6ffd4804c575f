use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::meal_pass::{MealPass, NewMealPass};

#[async_trait]
pub trait MealPassRepository: Send + Sync {
    async fn create(&self, pass: &NewMealPass) -> anyhow::Result<MealPass>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<MealPass>>;
    async fn find_by_qr_code(&self, qr_code: &str) -> anyhow::Result<Option<MealPass>>;
    /// Active passes of the user whose window ends after `now`.
    async fn list_current(&self, user_id: Uuid, now: DateTime<Utc>) -> anyhow::Result<Vec<MealPass>>;
}
