use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::prebooking_repository::PrebookingRepository;
use crate::domain::prebooking::{NewPrebooking, Prebooking, PrebookingStatus};
use crate::infrastructure::db::PgPool;

const PREBOOKING_COLUMNS: &str = "id, menu_id, mess_id, user_id, booking_date, booking_time, \
     quantity, status, created_at, updated_at";

pub struct SqlxPrebookingRepository {
    pub pool: PgPool,
}

impl SqlxPrebookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, column: &str, id: Uuid) -> anyhow::Result<Vec<Prebooking>> {
        let rows = sqlx::query(&format!(
            "SELECT {PREBOOKING_COLUMNS} FROM prebookings WHERE {column} = $1 ORDER BY created_at ASC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(prebooking_from_row).collect()
    }
}

fn prebooking_from_row(r: &PgRow) -> anyhow::Result<Prebooking> {
    Ok(Prebooking {
        id: r.get("id"),
        menu_id: r.get("menu_id"),
        mess_id: r.get("mess_id"),
        user_id: r.get("user_id"),
        date: r.get("booking_date"),
        time: r.get("booking_time"),
        quantity: r.get("quantity"),
        status: r.get::<String, _>("status").parse()?,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl PrebookingRepository for SqlxPrebookingRepository {
    async fn create(&self, prebooking: &NewPrebooking) -> anyhow::Result<Prebooking> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO prebookings (menu_id, mess_id, user_id, booking_date, booking_time, quantity)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {PREBOOKING_COLUMNS}"#
        ))
        .bind(prebooking.menu_id)
        .bind(prebooking.mess_id)
        .bind(prebooking.user_id)
        .bind(&prebooking.date)
        .bind(&prebooking.time)
        .bind(prebooking.quantity)
        .fetch_one(&self.pool)
        .await?;
        prebooking_from_row(&row)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Prebooking>> {
        let rows = sqlx::query(&format!(
            "SELECT {PREBOOKING_COLUMNS} FROM prebookings ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(prebooking_from_row).collect()
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Prebooking>> {
        self.list_where("user_id", user_id).await
    }

    async fn list_by_mess(&self, mess_id: Uuid) -> anyhow::Result<Vec<Prebooking>> {
        self.list_where("mess_id", mess_id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PrebookingStatus,
    ) -> anyhow::Result<Option<Prebooking>> {
        let row = sqlx::query(&format!(
            r#"UPDATE prebookings SET status = $2, updated_at = now()
               WHERE id = $1
               RETURNING {PREBOOKING_COLUMNS}"#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(prebooking_from_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM prebookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
