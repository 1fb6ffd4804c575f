use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::domain::subscriptions::{NewSubscription, SubscriptionStatus, UserSubscription};
use crate::infrastructure::db::PgPool;

const SUBSCRIPTION_COLUMNS: &str = "id, user_id, plan_id, start_date, end_date, status, \
     payment_id, payment_status, cancellation_reason, created_at, updated_at";

pub struct SqlxSubscriptionRepository {
    pub pool: PgPool,
}

impl SqlxSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn subscription_from_row(r: &PgRow) -> anyhow::Result<UserSubscription> {
    Ok(UserSubscription {
        id: r.get("id"),
        user_id: r.get("user_id"),
        plan_id: r.get("plan_id"),
        start_date: r.get("start_date"),
        end_date: r.get("end_date"),
        status: r.get::<String, _>("status").parse()?,
        payment_id: r.get("payment_id"),
        payment_status: r.get::<String, _>("payment_status").parse()?,
        cancellation_reason: r.get("cancellation_reason"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl SubscriptionRepository for SqlxSubscriptionRepository {
    async fn create(
        &self,
        subscription: &NewSubscription,
    ) -> anyhow::Result<Option<UserSubscription>> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO user_subscriptions (user_id, plan_id, start_date, end_date)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (user_id, plan_id) DO NOTHING
               RETURNING {SUBSCRIPTION_COLUMNS}"#
        ))
        .bind(subscription.user_id)
        .bind(subscription.plan_id)
        .bind(subscription.start_date)
        .bind(subscription.end_date)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(subscription_from_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserSubscription>> {
        let row = sqlx::query(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM user_subscriptions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(subscription_from_row).transpose()
    }

    async fn exists_for(&self, user_id: Uuid, plan_id: Uuid) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM user_subscriptions WHERE user_id = $1 AND plan_id = $2)"#,
        )
        .bind(user_id)
        .bind(plan_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<UserSubscription>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {SUBSCRIPTION_COLUMNS} FROM user_subscriptions
               WHERE user_id = $1 ORDER BY created_at DESC"#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(subscription_from_row).collect()
    }

    async fn list_by_plans(&self, plan_ids: &[Uuid]) -> anyhow::Result<Vec<UserSubscription>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {SUBSCRIPTION_COLUMNS} FROM user_subscriptions
               WHERE plan_id = ANY($1) ORDER BY created_at DESC"#
        ))
        .bind(plan_ids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(subscription_from_row).collect()
    }

    async fn save(&self, subscription: &UserSubscription) -> anyhow::Result<UserSubscription> {
        let row = sqlx::query(&format!(
            r#"UPDATE user_subscriptions
               SET start_date = $2, end_date = $3, status = $4, payment_id = $5,
                   payment_status = $6, cancellation_reason = $7, updated_at = $8
               WHERE id = $1
               RETURNING {SUBSCRIPTION_COLUMNS}"#
        ))
        .bind(subscription.id)
        .bind(subscription.start_date)
        .bind(subscription.end_date)
        .bind(subscription.status.as_str())
        .bind(&subscription.payment_id)
        .bind(subscription.payment_status.as_str())
        .bind(&subscription.cancellation_reason)
        .bind(subscription.updated_at)
        .fetch_one(&self.pool)
        .await?;
        subscription_from_row(&row)
    }

    async fn mark_plan_removed(
        &self,
        plan_id: Uuid,
        reason: &str,
        at: DateTime<Utc>,
    ) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"UPDATE user_subscriptions
               SET status = $2, end_date = $3, cancellation_reason = $4, updated_at = $3
               WHERE plan_id = $1"#,
        )
        .bind(plan_id)
        .bind(SubscriptionStatus::PlanRemoved.as_str())
        .bind(at)
        .bind(reason)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}
