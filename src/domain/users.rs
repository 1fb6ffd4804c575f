use chrono::{DateTime, Utc};
use uuid::Uuid;

string_enum!(LoginRole, "login role" {
    User => "User",
    MessOwner => "Mess Owner",
});

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub login_role: LoginRole,
    /// Numeric account id handed out at signup (milliseconds since epoch).
    pub user_number: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_mess_owner(&self) -> bool {
        self.login_role == LoginRole::MessOwner
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub login_role: LoginRole,
    pub user_number: i64,
}

pub fn user_number_at(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis()
}
