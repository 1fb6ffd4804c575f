use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

string_enum!(PlanDuration, "plan duration" {
    Daily => "Daily",
    Weekly => "Weekly",
    Monthly => "Monthly",
});

impl PlanDuration {
    pub fn days(&self) -> i64 {
        match self {
            PlanDuration::Daily => 1,
            PlanDuration::Weekly => 7,
            PlanDuration::Monthly => 30,
        }
    }

    /// Returns `(start, end)` for a subscription starting at `start`.
    pub fn window_from(&self, start: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (start, start + Duration::days(self.days()))
    }
}

string_enum!(PlanMealType, "meal type" {
    Veg => "Veg",
    NonVeg => "Non-Veg",
    Jain => "Jain",
});

string_enum!(SubscriptionStatus, "subscription status" {
    Active => "Active",
    Expired => "Expired",
    Cancelled => "Cancelled",
    Pending => "Pending",
    PlanRemoved => "Plan Removed",
});

string_enum!(PaymentStatus, "payment status" {
    Pending => "Pending",
    Completed => "Completed",
    Failed => "Failed",
});

pub const PLAN_NAME_MAX_LEN: usize = 200;
pub const PLAN_DESCRIPTION_MAX_LEN: usize = 1000;
pub const PLAN_REMOVED_REASON: &str = "Plan deleted by mess owner";

#[derive(Debug, Clone)]
pub struct SubscriptionPlan {
    pub id: Uuid,
    /// User id of the mess owner offering the plan.
    pub owner_id: Uuid,
    pub plan_name: String,
    pub duration: PlanDuration,
    pub meal_type: PlanMealType,
    pub price: f64,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPlan {
    pub owner_id: Uuid,
    pub plan_name: String,
    pub duration: PlanDuration,
    pub meal_type: PlanMealType,
    pub price: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub plan_name: Option<String>,
    pub duration: Option<PlanDuration>,
    pub meal_type: Option<PlanMealType>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl PlanPatch {
    pub fn apply(self, plan: &mut SubscriptionPlan, now: DateTime<Utc>) {
        if let Some(v) = self.plan_name {
            plan.plan_name = v;
        }
        if let Some(v) = self.duration {
            plan.duration = v;
        }
        if let Some(v) = self.meal_type {
            plan.meal_type = v;
        }
        if let Some(v) = self.price {
            plan.price = v;
        }
        if let Some(v) = self.description {
            plan.description = v;
        }
        if let Some(v) = self.is_active {
            plan.is_active = v;
        }
        plan.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct UserSubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSubscription {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Moves the subscription to `status`. Ending states close the window at
    /// `now`; activation restarts it for the plan's duration.
    pub fn transition(&mut self, status: SubscriptionStatus, duration: PlanDuration, now: DateTime<Utc>) {
        self.status = status;
        match status {
            SubscriptionStatus::Cancelled | SubscriptionStatus::Expired => {
                self.end_date = now;
            }
            SubscriptionStatus::Active => {
                let (start, end) = duration.window_from(now);
                self.start_date = start;
                self.end_date = end;
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
