use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::forum::{ForumPost, Pagination};
use crate::domain::mess::Mess;
use crate::domain::users::User;

/// A post together with the records its references resolve to.
#[derive(Debug, Clone)]
pub struct PostViewDto {
    pub post: ForumPost,
    pub author: Option<User>,
    pub mess: Option<Mess>,
    pub comment_authors: HashMap<Uuid, User>,
    /// False when the references were not looked up at all.
    pub populated: bool,
}

impl PostViewDto {
    pub fn bare(post: ForumPost) -> Self {
        Self {
            post,
            author: None,
            mess: None,
            comment_authors: HashMap::new(),
            populated: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostPageDto {
    pub posts: Vec<PostViewDto>,
    pub pagination: Pagination,
}
