use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, Row};
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::mess_repository::MessRepository;
use crate::domain::mess::{Mess, MessRating, NewMess};
use crate::infrastructure::db::PgPool;

const MESS_COLUMNS: &str = "id, mess_number, name, mobile_no, capacity, address, owner_id, \
     owner_number, description, image, created_at";

pub struct SqlxMessRepository {
    pub pool: PgPool,
}

impl SqlxMessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the ratings of every given mess in one round trip.
    async fn with_ratings(&self, mut messes: Vec<Mess>) -> anyhow::Result<Vec<Mess>> {
        if messes.is_empty() {
            return Ok(messes);
        }
        let ids: Vec<Uuid> = messes.iter().map(|m| m.id).collect();
        let rows = sqlx::query(
            r#"SELECT mess_id, user_id, rating FROM mess_ratings
               WHERE mess_id = ANY($1)
               ORDER BY created_at ASC"#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        let mut by_mess: HashMap<Uuid, Vec<MessRating>> = HashMap::new();
        for r in rows {
            by_mess
                .entry(r.get("mess_id"))
                .or_default()
                .push(MessRating {
                    user_id: r.get("user_id"),
                    rating: r.get("rating"),
                });
        }
        for mess in &mut messes {
            mess.ratings = by_mess.remove(&mess.id).unwrap_or_default();
        }
        Ok(messes)
    }

    async fn one_with_ratings(&self, row: Option<PgRow>) -> anyhow::Result<Option<Mess>> {
        match row {
            Some(r) => Ok(self.with_ratings(vec![mess_from_row(&r)]).await?.pop()),
            None => Ok(None),
        }
    }
}

fn mess_from_row(r: &PgRow) -> Mess {
    Mess {
        id: r.get("id"),
        mess_number: r.get("mess_number"),
        name: r.get("name"),
        mobile_no: r.get("mobile_no"),
        capacity: r.get("capacity"),
        address: r.get("address"),
        owner_id: r.get("owner_id"),
        owner_number: r.get("owner_number"),
        description: r.get("description"),
        image: r.get("image"),
        ratings: Vec::new(),
        created_at: r.get("created_at"),
    }
}

const MESS_NUMBER_ATTEMPTS: i64 = 32;

/// Inserts `mess`, moving up to the next free `mess_number` when two messes are
/// created in the same millisecond.
pub(crate) async fn insert_mess(conn: &mut PgConnection, mess: &NewMess) -> anyhow::Result<Mess> {
    for bump in 0..MESS_NUMBER_ATTEMPTS {
        let row = sqlx::query(&format!(
            r#"INSERT INTO messes
                 (mess_number, name, mobile_no, capacity, address, owner_id, owner_number, description, image)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               ON CONFLICT (mess_number) DO NOTHING
               RETURNING {MESS_COLUMNS}"#
        ))
        .bind(mess.mess_number.saturating_add(bump))
        .bind(&mess.name)
        .bind(&mess.mobile_no)
        .bind(mess.capacity)
        .bind(&mess.address)
        .bind(mess.owner_id)
        .bind(mess.owner_number)
        .bind(&mess.description)
        .bind(&mess.image)
        .fetch_optional(&mut *conn)
        .await?;
        if let Some(row) = row {
            return Ok(mess_from_row(&row));
        }
    }
    anyhow::bail!("no free mess number after {}", mess.mess_number)
}

#[async_trait]
impl MessRepository for SqlxMessRepository {
    async fn create(&self, mess: &NewMess) -> anyhow::Result<Mess> {
        let mut conn = self.pool.acquire().await?;
        insert_mess(&mut conn, mess).await
    }

    async fn list(&self, limit: i64) -> anyhow::Result<Vec<Mess>> {
        let rows = sqlx::query(&format!(
            "SELECT {MESS_COLUMNS} FROM messes ORDER BY created_at ASC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        self.with_ratings(rows.iter().map(mess_from_row).collect())
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Mess>> {
        let row = sqlx::query(&format!("SELECT {MESS_COLUMNS} FROM messes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        self.one_with_ratings(row).await
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Option<Mess>> {
        let row = sqlx::query(&format!(
            "SELECT {MESS_COLUMNS} FROM messes WHERE owner_id = $1 ORDER BY created_at ASC LIMIT 1"
        ))
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        self.one_with_ratings(row).await
    }

    async fn save(&self, mess: &Mess) -> anyhow::Result<Mess> {
        let row = sqlx::query(&format!(
            r#"UPDATE messes
               SET name = $2, mobile_no = $3, capacity = $4, address = $5,
                   description = $6, image = $7, updated_at = now()
               WHERE id = $1
               RETURNING {MESS_COLUMNS}"#
        ))
        .bind(mess.id)
        .bind(&mess.name)
        .bind(&mess.mobile_no)
        .bind(mess.capacity)
        .bind(&mess.address)
        .bind(&mess.description)
        .bind(&mess.image)
        .fetch_one(&self.pool)
        .await?;
        Ok(self
            .with_ratings(vec![mess_from_row(&row)])
            .await?
            .pop()
            .unwrap_or_else(|| mess.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM messes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn add_rating(&self, mess_id: Uuid, user_id: Uuid, rating: i32) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO mess_ratings (mess_id, user_id, rating) VALUES ($1, $2, $3)
               ON CONFLICT (mess_id, user_id) DO NOTHING"#,
        )
        .bind(mess_id)
        .bind(user_id)
        .bind(rating)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
