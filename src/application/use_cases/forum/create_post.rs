use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::forum_repository::ForumRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::forum::{ForumPost, PostType};

pub struct CreatePost<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: ForumRepository + ?Sized,
{
    pub users: &'a U,
    pub forum: &'a F,
}

#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub post_type: PostType,
    pub mess_id: Option<Uuid>,
    pub poll_options: Option<Vec<String>>,
}

pub(crate) fn check_text(title: &str, content: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::invalid("Title is required"));
    }
    if content.trim().is_empty() {
        return Err(ServiceError::invalid("Content is required"));
    }
    Ok(())
}

impl<'a, U, F> CreatePost<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: ForumRepository + ?Sized,
{
    pub async fn execute(&self, author_id: Uuid, req: CreatePostRequest) -> ServiceResult<ForumPost> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(ServiceError::not_found("User"));
        }
        check_text(&req.title, &req.content)?;
        let post = ForumPost::new(
            author_id,
            req.title,
            req.content,
            req.post_type,
            req.mess_id,
            req.poll_options,
            Utc::now(),
        );
        self.forum.insert(&post).await?;
        info!(post_id = %post.id, author_id = %author_id, kind = %post.post_type, "forum_post_created");
        Ok(post)
    }
}
