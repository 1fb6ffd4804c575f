use chrono::Utc;
use uuid::Uuid;

use crate::application::dto::forum::PostViewDto;
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::forum_repository::ForumRepository;
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::forum::list_posts::populate;
use crate::domain::forum::{ForumError, ForumPost};

pub(crate) async fn load<F: ForumRepository + ?Sized>(forum: &F, post_id: Uuid) -> ServiceResult<ForumPost> {
    forum
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Post"))
}

pub struct AddComment<'a, U, M, F>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
    F: ForumRepository + ?Sized,
{
    pub users: &'a U,
    pub messes: &'a M,
    pub forum: &'a F,
}

impl<'a, U, M, F> AddComment<'a, U, M, F>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
    F: ForumRepository + ?Sized,
{
    pub async fn execute(&self, post_id: Uuid, user_id: Uuid, content: String) -> ServiceResult<PostViewDto> {
        let mut post = load(self.forum, post_id).await?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("User"));
        }
        if content.trim().is_empty() {
            return Err(ServiceError::invalid("Comment content is required"));
        }
        post.add_comment(user_id, content, Utc::now());
        self.forum.save(&post).await?;
        Ok(populate(self.users, self.messes, post).await?)
    }
}

pub struct VotePoll<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: ForumRepository + ?Sized,
{
    pub users: &'a U,
    pub forum: &'a F,
}

impl<'a, U, F> VotePoll<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: ForumRepository + ?Sized,
{
    pub async fn execute(&self, post_id: Uuid, user_id: Uuid, option_index: i64) -> ServiceResult<ForumPost> {
        let mut post = match self.forum.find_by_id(post_id).await? {
            Some(p) if p.has_open_poll() => p,
            _ => return Err(ForumError::PollUnavailable.into()),
        };
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("User"));
        }
        post.vote(user_id, option_index, Utc::now())?;
        self.forum.save(&post).await?;
        Ok(post)
    }
}

pub struct LikePost<'a, F: ForumRepository + ?Sized> {
    pub forum: &'a F,
}

impl<'a, F: ForumRepository + ?Sized> LikePost<'a, F> {
    pub async fn execute(&self, post_id: Uuid, user_id: Uuid) -> ServiceResult<ForumPost> {
        let mut post = load(self.forum, post_id).await?;
        post.toggle_like(user_id, Utc::now());
        self.forum.save(&post).await?;
        Ok(post)
    }
}

pub struct LikeComment<'a, F: ForumRepository + ?Sized> {
    pub forum: &'a F,
}

impl<'a, F: ForumRepository + ?Sized> LikeComment<'a, F> {
    pub async fn execute(&self, post_id: Uuid, comment_id: Uuid, user_id: Uuid) -> ServiceResult<ForumPost> {
        let mut post = load(self.forum, post_id).await?;
        post.toggle_comment_like(comment_id, user_id, Utc::now())?;
        self.forum.save(&post).await?;
        Ok(post)
    }
}

pub struct DeleteComment<'a, F: ForumRepository + ?Sized> {
    pub forum: &'a F,
}

impl<'a, F: ForumRepository + ?Sized> DeleteComment<'a, F> {
    pub async fn execute(&self, post_id: Uuid, comment_id: Uuid, user_id: Uuid) -> ServiceResult<ForumPost> {
        let mut post = load(self.forum, post_id).await?;
        post.remove_comment(comment_id, user_id, Utc::now())?;
        self.forum.save(&post).await?;
        Ok(post)
    }
}
