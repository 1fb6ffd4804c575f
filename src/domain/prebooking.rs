use chrono::{DateTime, Utc};
use uuid::Uuid;

string_enum!(PrebookingStatus, "prebooking status" {
    Pending => "Pending",
    Confirmed => "Confirmed",
    Cancelled => "Cancelled",
});

#[derive(Debug, Clone)]
pub struct Prebooking {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub mess_id: Uuid,
    pub user_id: Uuid,
    /// Free-form date and time strings as entered by the diner.
    pub date: String,
    pub time: String,
    pub quantity: i32,
    pub status: PrebookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPrebooking {
    pub menu_id: Uuid,
    pub mess_id: Uuid,
    pub user_id: Uuid,
    pub date: String,
    pub time: String,
    pub quantity: i32,
}
