use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::check_in_repository::CheckInRepository;
use crate::application::ports::meal_pass_repository::MealPassRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::domain::check_in::{CheckIn, MealType, NewCheckIn};

const ALREADY_CHECKED_IN: &str = "Already checked in for this meal today";

pub struct RecordCheckIn<'a, MP, S, C>
where
    MP: MealPassRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    C: CheckInRepository + ?Sized,
{
    pub passes: &'a MP,
    pub subscriptions: &'a S,
    pub check_ins: &'a C,
}

impl<'a, MP, S, C> RecordCheckIn<'a, MP, S, C>
where
    MP: MealPassRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    C: CheckInRepository + ?Sized,
{
    /// Records one meal for the pass holder. The check-in belongs to the
    /// pass's mess, whatever `scanned_at` says.
    pub async fn execute(
        &self,
        scanned_at: Uuid,
        meal_pass_id: Uuid,
        meal_type: MealType,
    ) -> ServiceResult<CheckIn> {
        let pass = self
            .passes
            .find_by_id(meal_pass_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Meal pass"))?;
        if !pass.is_usable() {
            return Err(ServiceError::forbidden("Meal pass is inactive or blocked"));
        }
        let subscription = self
            .subscriptions
            .find_by_id(pass.subscription_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Subscription"))?;
        if !subscription.is_active() {
            return Err(ServiceError::forbidden(format!(
                "Subscription is not active. Current status: {}",
                subscription.status
            )));
        }
        let today = Utc::now().date_naive();
        if self
            .check_ins
            .exists_for_day(pass.id, meal_type, today)
            .await?
        {
            warn!(meal_pass_id = %pass.id, meal = %meal_type, "duplicate_check_in");
            return Err(ServiceError::invalid(ALREADY_CHECKED_IN));
        }
        if scanned_at != pass.owner_id {
            warn!(meal_pass_id = %pass.id, scanned_at = %scanned_at, owner_id = %pass.owner_id, "check_in_at_other_mess");
        }
        let check_in = self
            .check_ins
            .create(&NewCheckIn {
                user_id: pass.user_id,
                mess_id: pass.owner_id,
                meal_pass_id: pass.id,
                meal_type,
                served_on: today,
            })
            .await?
            .ok_or_else(|| ServiceError::invalid(ALREADY_CHECKED_IN))?;
        info!(check_in_id = %check_in.id, meal_pass_id = %pass.id, meal = %meal_type, "check_in_recorded");
        Ok(check_in)
    }
}
