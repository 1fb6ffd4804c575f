use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::meal_pass_repository::MealPassRepository;
use crate::domain::meal_pass::{MealPass, NewMealPass};
use crate::infrastructure::db::PgPool;

const PASS_COLUMNS: &str = "id, user_id, subscription_id, owner_id, qr_code, is_active, \
     is_blocked, block_reason, valid_from, valid_till, created_at, updated_at";

pub struct SqlxMealPassRepository {
    pub pool: PgPool,
}

impl SqlxMealPassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn pass_from_row(r: &PgRow) -> MealPass {
    MealPass {
        id: r.get("id"),
        user_id: r.get("user_id"),
        subscription_id: r.get("subscription_id"),
        owner_id: r.get("owner_id"),
        qr_code: r.get("qr_code"),
        is_active: r.get("is_active"),
        is_blocked: r.get("is_blocked"),
        block_reason: r.get("block_reason"),
        valid_from: r.get("valid_from"),
        valid_till: r.get("valid_till"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl MealPassRepository for SqlxMealPassRepository {
    async fn create(&self, pass: &NewMealPass) -> anyhow::Result<MealPass> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO meal_passes (user_id, subscription_id, owner_id, qr_code, valid_from, valid_till)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {PASS_COLUMNS}"#
        ))
        .bind(pass.user_id)
        .bind(pass.subscription_id)
        .bind(pass.owner_id)
        .bind(&pass.qr_code)
        .bind(pass.valid_from)
        .bind(pass.valid_till)
        .fetch_one(&self.pool)
        .await?;
        Ok(pass_from_row(&row))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<MealPass>> {
        let row = sqlx::query(&format!("SELECT {PASS_COLUMNS} FROM meal_passes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(pass_from_row))
    }

    async fn find_by_qr_code(&self, qr_code: &str) -> anyhow::Result<Option<MealPass>> {
        let row = sqlx::query(&format!(
            "SELECT {PASS_COLUMNS} FROM meal_passes WHERE qr_code = $1"
        ))
        .bind(qr_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(pass_from_row))
    }

    async fn list_current(&self, user_id: Uuid, now: DateTime<Utc>) -> anyhow::Result<Vec<MealPass>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {PASS_COLUMNS} FROM meal_passes
               WHERE user_id = $1 AND is_active AND valid_till > $2
               ORDER BY created_at ASC"#
        ))
        .bind(user_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(pass_from_row).collect())
    }
}
