use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;
use sqlx::postgres::PgRow;
use tracing::warn;
use uuid::Uuid;

use crate::application::ports::check_in_repository::CheckInRepository;
use crate::domain::check_in::{
    CheckIn, CheckInFilter, CheckInStatus, MealTally, MealType, NewCheckIn,
};
use crate::infrastructure::db::PgPool;

const CHECK_IN_COLUMNS: &str = "id, user_id, mess_id, meal_pass_id, meal_type, status, \
     failure_reason, served_on, created_at, updated_at";

pub struct SqlxCheckInRepository {
    pub pool: PgPool,
}

impl SqlxCheckInRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn check_in_from_row(r: &PgRow) -> anyhow::Result<CheckIn> {
    Ok(CheckIn {
        id: r.get("id"),
        user_id: r.get("user_id"),
        mess_id: r.get("mess_id"),
        meal_pass_id: r.get("meal_pass_id"),
        meal_type: r.get::<String, _>("meal_type").parse()?,
        status: r.get::<String, _>("status").parse()?,
        failure_reason: r.get("failure_reason"),
        served_on: r.get("served_on"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl CheckInRepository for SqlxCheckInRepository {
    async fn create(&self, check_in: &NewCheckIn) -> anyhow::Result<Option<CheckIn>> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO check_ins (user_id, mess_id, meal_pass_id, meal_type, status, served_on)
               VALUES ($1, $2, $3, $4, $5, $6)
               ON CONFLICT (meal_pass_id, meal_type, served_on) DO NOTHING
               RETURNING {CHECK_IN_COLUMNS}"#
        ))
        .bind(check_in.user_id)
        .bind(check_in.mess_id)
        .bind(check_in.meal_pass_id)
        .bind(check_in.meal_type.as_str())
        .bind(CheckInStatus::Success.as_str())
        .bind(check_in.served_on)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(check_in_from_row).transpose()
    }

    async fn exists_for_day(
        &self,
        meal_pass_id: Uuid,
        meal_type: MealType,
        day: NaiveDate,
    ) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(
                 SELECT 1 FROM check_ins
                 WHERE meal_pass_id = $1 AND meal_type = $2 AND served_on = $3)"#,
        )
        .bind(meal_pass_id)
        .bind(meal_type.as_str())
        .bind(day)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn list(&self, mess_id: Uuid, filter: &CheckInFilter) -> anyhow::Result<Vec<CheckIn>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {CHECK_IN_COLUMNS} FROM check_ins
               WHERE mess_id = $1
                 AND ($2::uuid IS NULL OR user_id = $2)
                 AND ($3::date IS NULL OR served_on = $3)
                 AND ($4::text IS NULL OR meal_type = $4)
               ORDER BY created_at DESC"#
        ))
        .bind(mess_id)
        .bind(filter.user_id)
        .bind(filter.served_on)
        .bind(filter.meal_type.map(|m| m.as_str()))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(check_in_from_row).collect()
    }

    async fn tally_successful(&self, mess_id: Uuid, day: NaiveDate) -> anyhow::Result<MealTally> {
        let rows = sqlx::query(
            r#"SELECT meal_type, COUNT(*)::BIGINT AS count FROM check_ins
               WHERE mess_id = $1 AND served_on = $2 AND status = $3
               GROUP BY meal_type"#,
        )
        .bind(mess_id)
        .bind(day)
        .bind(CheckInStatus::Success.as_str())
        .fetch_all(&self.pool)
        .await?;
        let mut tally = MealTally::default();
        for r in rows {
            let meal: String = r.get("meal_type");
            match meal.parse::<MealType>() {
                Ok(m) => tally.add(m, r.get("count")),
                Err(e) => warn!(error = %e, "unexpected_meal_type"),
            }
        }
        Ok(tally)
    }
}
