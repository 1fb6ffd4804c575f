use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::menu_repository::MenuRepository;
use crate::domain::menu::{Menu, NewMenu};
use crate::infrastructure::db::{PgPool, like_pattern};

const MENU_COLUMNS: &str =
    "id, name, description, price, owner_id, availability, food_type, menu_date";

pub struct SqlxMenuRepository {
    pub pool: PgPool,
}

impl SqlxMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn menu_from_row(r: &PgRow) -> anyhow::Result<Menu> {
    Ok(Menu {
        id: r.get("id"),
        name: r.get("name"),
        description: r.get("description"),
        price: r.get("price"),
        owner_id: r.get("owner_id"),
        availability: r.get::<String, _>("availability").parse()?,
        food_type: r.get::<String, _>("food_type").parse()?,
        date: r.get("menu_date"),
    })
}

#[async_trait]
impl MenuRepository for SqlxMenuRepository {
    async fn create(&self, menu: &NewMenu) -> anyhow::Result<Menu> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO menus (name, description, price, owner_id, availability, food_type)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {MENU_COLUMNS}"#
        ))
        .bind(&menu.name)
        .bind(&menu.description)
        .bind(menu.price)
        .bind(menu.owner_id)
        .bind(menu.availability.as_str())
        .bind(menu.food_type.as_str())
        .fetch_one(&self.pool)
        .await?;
        menu_from_row(&row)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Menu>> {
        let rows = sqlx::query(&format!(
            "SELECT {MENU_COLUMNS} FROM menus ORDER BY menu_date ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(menu_from_row).collect()
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Menu>> {
        let rows = sqlx::query(&format!(
            "SELECT {MENU_COLUMNS} FROM menus WHERE owner_id = $1 ORDER BY menu_date ASC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(menu_from_row).collect()
    }

    async fn search_by_owner(&self, owner_id: Uuid, query: &str) -> anyhow::Result<Vec<Menu>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {MENU_COLUMNS} FROM menus
               WHERE owner_id = $1 AND name ILIKE $2 ESCAPE '\'
               ORDER BY menu_date ASC"#
        ))
        .bind(owner_id)
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(menu_from_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Menu>> {
        let row = sqlx::query(&format!("SELECT {MENU_COLUMNS} FROM menus WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(menu_from_row).transpose()
    }

    async fn save(&self, menu: &Menu) -> anyhow::Result<Menu> {
        let row = sqlx::query(&format!(
            r#"UPDATE menus
               SET name = $2, description = $3, price = $4, availability = $5, food_type = $6
               WHERE id = $1
               RETURNING {MENU_COLUMNS}"#
        ))
        .bind(menu.id)
        .bind(&menu.name)
        .bind(&menu.description)
        .bind(menu.price)
        .bind(menu.availability.as_str())
        .bind(menu.food_type.as_str())
        .fetch_one(&self.pool)
        .await?;
        menu_from_row(&row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
