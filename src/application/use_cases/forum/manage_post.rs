use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::forum_repository::ForumRepository;
use crate::application::use_cases::forum::create_post::check_text;
use crate::application::use_cases::forum::interact::load;
use crate::domain::forum::{ForumPost, PostType};

#[derive(Debug, Clone)]
pub struct EditPostRequest {
    pub title: String,
    pub content: String,
    pub post_type: PostType,
    pub poll_options: Option<Vec<String>>,
}

pub struct UpdatePost<'a, F: ForumRepository + ?Sized> {
    pub forum: &'a F,
}

impl<'a, F: ForumRepository + ?Sized> UpdatePost<'a, F> {
    pub async fn execute(&self, post_id: Uuid, user_id: Uuid, req: EditPostRequest) -> ServiceResult<ForumPost> {
        let mut post = load(self.forum, post_id).await?;
        if post.author_id != user_id {
            return Err(ServiceError::forbidden("You can only edit your own posts"));
        }
        check_text(&req.title, &req.content)?;
        post.edit(req.title, req.content, req.post_type, req.poll_options, Utc::now());
        self.forum.save(&post).await?;
        Ok(post)
    }
}

pub struct DeletePost<'a, F: ForumRepository + ?Sized> {
    pub forum: &'a F,
}

impl<'a, F: ForumRepository + ?Sized> DeletePost<'a, F> {
    pub async fn execute(&self, post_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let post = load(self.forum, post_id).await?;
        if post.author_id != user_id {
            return Err(ServiceError::forbidden("You can only delete your own posts"));
        }
        self.forum.delete(post.id).await?;
        info!(post_id = %post.id, "forum_post_deleted");
        Ok(())
    }
}
