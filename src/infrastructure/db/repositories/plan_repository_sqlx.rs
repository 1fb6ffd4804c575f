use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::plan_repository::PlanRepository;
use crate::domain::subscriptions::{NewPlan, SubscriptionPlan};
use crate::infrastructure::db::PgPool;

const PLAN_COLUMNS: &str = "id, owner_id, plan_name, duration, meal_type, price, description, \
     is_active, created_at, updated_at";

pub struct SqlxPlanRepository {
    pub pool: PgPool,
}

impl SqlxPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn plan_from_row(r: &PgRow) -> anyhow::Result<SubscriptionPlan> {
    Ok(SubscriptionPlan {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        plan_name: r.get("plan_name"),
        duration: r.get::<String, _>("duration").parse()?,
        meal_type: r.get::<String, _>("meal_type").parse()?,
        price: r.get("price"),
        description: r.get("description"),
        is_active: r.get("is_active"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl PlanRepository for SqlxPlanRepository {
    async fn create(&self, plan: &NewPlan) -> anyhow::Result<SubscriptionPlan> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO subscription_plans (owner_id, plan_name, duration, meal_type, price, description)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {PLAN_COLUMNS}"#
        ))
        .bind(plan.owner_id)
        .bind(&plan.plan_name)
        .bind(plan.duration.as_str())
        .bind(plan.meal_type.as_str())
        .bind(plan.price)
        .bind(&plan.description)
        .fetch_one(&self.pool)
        .await?;
        plan_from_row(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<SubscriptionPlan>> {
        let row = sqlx::query(&format!(
            "SELECT {PLAN_COLUMNS} FROM subscription_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(plan_from_row).transpose()
    }

    async fn save(&self, plan: &SubscriptionPlan) -> anyhow::Result<SubscriptionPlan> {
        let row = sqlx::query(&format!(
            r#"UPDATE subscription_plans
               SET plan_name = $2, duration = $3, meal_type = $4, price = $5,
                   description = $6, is_active = $7, updated_at = $8
               WHERE id = $1
               RETURNING {PLAN_COLUMNS}"#
        ))
        .bind(plan.id)
        .bind(&plan.plan_name)
        .bind(plan.duration.as_str())
        .bind(plan.meal_type.as_str())
        .bind(plan.price)
        .bind(&plan.description)
        .bind(plan.is_active)
        .bind(plan.updated_at)
        .fetch_one(&self.pool)
        .await?;
        plan_from_row(&row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM subscription_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        active_only: bool,
    ) -> anyhow::Result<Vec<SubscriptionPlan>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {PLAN_COLUMNS} FROM subscription_plans
               WHERE owner_id = $1 AND (NOT $2 OR is_active)
               ORDER BY created_at ASC"#
        ))
        .bind(owner_id)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(plan_from_row).collect()
    }

    async fn list_active(&self) -> anyhow::Result<Vec<SubscriptionPlan>> {
        let rows = sqlx::query(&format!(
            "SELECT {PLAN_COLUMNS} FROM subscription_plans WHERE is_active ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(plan_from_row).collect()
    }
}
