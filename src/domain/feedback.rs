use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const COMMENTS_MAX_LEN: usize = 500;

#[derive(Debug, Clone)]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Uuid,
    pub comments: String,
    pub rating: i32,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub user_id: Uuid,
    pub comments: String,
    pub rating: i32,
}
