use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::application::ports::forum_repository::ForumRepository;
use crate::domain::forum::{Comment, ForumPost, PollOption, PostFilter};
use crate::infrastructure::db::{PgPool, like_pattern};

const POST_COLUMNS: &str = "id, title, content, author_id, mess_id, post_type, tags, likes, \
     comments, poll_options, is_poll_active, created_at, updated_at";

const FILTER_CLAUSE: &str = r#"($1::uuid IS NULL OR mess_id = $1)
   AND ($2::text IS NULL OR post_type = $2)
   AND ($3::text IS NULL OR title ILIKE $3 ESCAPE '\' OR content ILIKE $3 ESCAPE '\')"#;

pub struct SqlxForumRepository {
    pub pool: PgPool,
}

impl SqlxForumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn post_from_row(r: &PgRow) -> anyhow::Result<ForumPost> {
    let comments: Json<Vec<Comment>> = r.get("comments");
    let poll_options: Option<Json<Vec<PollOption>>> = r.get("poll_options");
    Ok(ForumPost {
        id: r.get("id"),
        title: r.get("title"),
        content: r.get("content"),
        author_id: r.get("author_id"),
        mess_id: r.get("mess_id"),
        post_type: r.get::<String, _>("post_type").parse()?,
        tags: r.get("tags"),
        likes: r.get("likes"),
        comments: comments.0,
        poll_options: poll_options.map(|p| p.0),
        is_poll_active: r.get("is_poll_active"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl ForumRepository for SqlxForumRepository {
    async fn insert(&self, post: &ForumPost) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO forum_posts
                 (id, title, content, author_id, mess_id, post_type, tags, likes,
                  comments, poll_options, is_poll_active, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id)
        .bind(post.mess_id)
        .bind(post.post_type.as_str())
        .bind(&post.tags)
        .bind(&post.likes)
        .bind(Json(&post.comments))
        .bind(post.poll_options.as_ref().map(Json))
        .bind(post.is_poll_active)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ForumPost>> {
        let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM forum_posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(post_from_row).transpose()
    }

    async fn save(&self, post: &ForumPost) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"UPDATE forum_posts
               SET title = $2, content = $3, post_type = $4, tags = $5, likes = $6,
                   comments = $7, poll_options = $8, is_poll_active = $9, updated_at = $10
               WHERE id = $1"#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.post_type.as_str())
        .bind(&post.tags)
        .bind(&post.likes)
        .bind(Json(&post.comments))
        .bind(post.poll_options.as_ref().map(Json))
        .bind(post.is_poll_active)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            anyhow::bail!("forum post {} vanished", post.id);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM forum_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<(Vec<ForumPost>, i64)> {
        let post_type = filter.post_type.map(|t| t.as_str());
        let search = filter
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*)::BIGINT FROM forum_posts WHERE {FILTER_CLAUSE}"
        ))
        .bind(filter.mess_id)
        .bind(post_type)
        .bind(search.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(&format!(
            r#"SELECT {POST_COLUMNS} FROM forum_posts
               WHERE {FILTER_CLAUSE}
               ORDER BY created_at DESC
               OFFSET $4 LIMIT $5"#
        ))
        .bind(filter.mess_id)
        .bind(post_type)
        .bind(search.as_deref())
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        let posts = rows.iter().map(post_from_row).collect::<anyhow::Result<Vec<_>>>()?;
        Ok((posts, total))
    }
}
