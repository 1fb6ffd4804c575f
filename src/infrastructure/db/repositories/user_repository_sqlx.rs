use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use uuid::Uuid;

use super::mess_repository_sqlx::insert_mess;
use crate::application::ports::user_repository::{ProfileUpdate, UserRepository};
use crate::domain::mess::{Mess, NewMess};
use crate::domain::users::{NewUser, User};
use crate::infrastructure::db::PgPool;

const USER_COLUMNS: &str = "id, username, email, password_hash, login_role, user_number, created_at";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(r: &PgRow) -> anyhow::Result<User> {
    Ok(User {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        password_hash: r.get("password_hash"),
        login_role: r.get::<String, _>("login_role").parse()?,
        user_number: r.get("user_number"),
        created_at: r.get("created_at"),
    })
}

/// Returns `None` when the username or email is already taken.
async fn insert_user(conn: &mut PgConnection, user: &NewUser) -> anyhow::Result<Option<User>> {
    let row = sqlx::query(&format!(
        r#"INSERT INTO users (username, email, password_hash, login_role, user_number)
           VALUES ($1, $2, $3, $4, $5)
           ON CONFLICT DO NOTHING
           RETURNING {USER_COLUMNS}"#
    ))
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.login_role.as_str())
    .bind(user.user_number)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(user_from_row).transpose()
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        insert_user(&mut conn, user).await
    }

    async fn create_owner(
        &self,
        user: &NewUser,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<(User, Mess)>> {
        let mut tx = self.pool.begin().await?;
        let Some(owner) = insert_user(&mut tx, user).await? else {
            return Ok(None);
        };
        let mess = insert_mess(
            &mut tx,
            &NewMess::default_for_owner(owner.id, owner.user_number, now),
        )
        .await?;
        tx.commit().await?;
        Ok(Some((owner, mess)))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_user_number(&self, user_number: i64) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_number = $1"
        ))
        .bind(user_number)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn update_profile(
        &self,
        id: Uuid,
        username: &str,
        email: &str,
    ) -> anyhow::Result<ProfileUpdate> {
        let updated = sqlx::query(&format!(
            r#"UPDATE users SET username = $2, email = $3, updated_at = now()
               WHERE id = $1
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        match updated {
            Ok(Some(row)) => Ok(ProfileUpdate::Updated(user_from_row(&row)?)),
            Ok(None) => Ok(ProfileUpdate::Missing),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(ProfileUpdate::Taken),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
