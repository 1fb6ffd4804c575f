use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::domain::feedback::{Feedback, NewFeedback};
use crate::infrastructure::db::PgPool;

pub struct SqlxFeedbackRepository {
    pub pool: PgPool,
}

impl SqlxFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn feedback_from_row(r: &PgRow) -> Feedback {
    Feedback {
        id: r.get("id"),
        user_id: r.get("user_id"),
        comments: r.get("comments"),
        rating: r.get("rating"),
        submitted_at: r.get("submitted_at"),
    }
}

#[async_trait]
impl FeedbackRepository for SqlxFeedbackRepository {
    async fn create(&self, feedback: &NewFeedback) -> anyhow::Result<Feedback> {
        let row = sqlx::query(
            r#"INSERT INTO feedback (user_id, comments, rating) VALUES ($1, $2, $3)
               RETURNING id, user_id, comments, rating, submitted_at"#,
        )
        .bind(feedback.user_id)
        .bind(&feedback.comments)
        .bind(feedback.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(feedback_from_row(&row))
    }

    async fn list(&self) -> anyhow::Result<Vec<Feedback>> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, comments, rating, submitted_at
               FROM feedback ORDER BY submitted_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(feedback_from_row).collect())
    }
}
