use sqlx::{Pool, Postgres};

pub type PgPool = Pool<Postgres>;

pub async fn connect_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// `%query%` for `ILIKE ... ESCAPE '\'`, with the wildcards in `query` escaped.
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

pub mod repositories;

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("thali"), "%thali%");
        assert_eq!(like_pattern("100%_veg"), "%100\\%\\_veg%");
    }
}
