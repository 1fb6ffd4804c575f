use std::collections::HashMap;

use crate::application::dto::forum::{PostPageDto, PostViewDto};
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::forum_repository::ForumRepository;
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::forum::{ForumPost, MAX_PAGE_SIZE, Pagination, PostFilter};

/// Resolves the author, the mess and every comment author of `post`.
pub(crate) async fn populate<U, M>(users: &U, messes: &M, post: ForumPost) -> anyhow::Result<PostViewDto>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
{
    let author = users.find_by_id(post.author_id).await?;
    let mess = match post.mess_id {
        Some(id) => messes.find_by_id(id).await?,
        None => None,
    };
    let mut comment_authors = HashMap::new();
    for comment in &post.comments {
        if comment_authors.contains_key(&comment.user_id) {
            continue;
        }
        if let Some(user) = users.find_by_id(comment.user_id).await? {
            comment_authors.insert(comment.user_id, user);
        }
    }
    Ok(PostViewDto {
        post,
        author,
        mess,
        comment_authors,
        populated: true,
    })
}

pub struct ListPosts<'a, U, M, F>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
    F: ForumRepository + ?Sized,
{
    pub users: &'a U,
    pub messes: &'a M,
    pub forum: &'a F,
}

impl<'a, U, M, F> ListPosts<'a, U, M, F>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
    F: ForumRepository + ?Sized,
{
    pub async fn execute(&self, filter: &PostFilter, page: i64, limit: i64) -> ServiceResult<PostPageDto> {
        if page < 1 {
            return Err(ServiceError::invalid("Page must be at least 1"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(ServiceError::invalid(format!(
                "Limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        let offset = Pagination::offset(page, limit)
            .ok_or_else(|| ServiceError::invalid("Page is out of range"))?;
        let (rows, total) = self.forum.list(filter, offset, limit).await?;
        let mut posts = Vec::with_capacity(rows.len());
        for post in rows {
            posts.push(populate(self.users, self.messes, post).await?);
        }
        Ok(PostPageDto {
            posts,
            pagination: Pagination::new(page, limit, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::forum::create_post::{CreatePost, CreatePostRequest};
    use crate::domain::forum::{DEFAULT_PAGE_SIZE, PostType};
    use crate::domain::users::LoginRole;
    use crate::testing::{MemoryStore, seed_mess, seed_user};

    fn request(title: &str, mess_id: Option<uuid::Uuid>) -> CreatePostRequest {
        CreatePostRequest {
            title: title.into(),
            content: "Discuss".into(),
            post_type: PostType::General,
            mess_id,
            poll_options: None,
        }
    }

    #[tokio::test]
    async fn pages_newest_first_with_authors() {
        let store = MemoryStore::default();
        let owner = seed_user(&store, "owner", LoginRole::MessOwner).await;
        let mess = seed_mess(&store, &owner, "Udupi").await;
        let create = CreatePost {
            users: &store,
            forum: &store,
        };
        for i in 0..12 {
            create
                .execute(owner.id, request(&format!("Post {i}"), Some(mess.id)))
                .await
                .unwrap();
        }
        let uc = ListPosts {
            users: &store,
            messes: &store,
            forum: &store,
        };
        let first = uc
            .execute(&PostFilter::default(), 1, DEFAULT_PAGE_SIZE)
            .await
            .unwrap();
        assert_eq!(first.posts.len(), 10);
        assert_eq!(first.posts[0].post.title, "Post 11");
        assert_eq!(first.posts[0].author.as_ref().unwrap().username, "owner");
        assert_eq!(first.posts[0].mess.as_ref().unwrap().name, "Udupi");
        assert_eq!(first.pagination.total_pages, 2);
        assert!(first.pagination.has_next_page);

        let second = uc.execute(&PostFilter::default(), 2, 10).await.unwrap();
        assert_eq!(second.posts.len(), 2);
        assert!(!second.pagination.has_next_page);
    }

    #[tokio::test]
    async fn rejects_bad_paging() {
        let store = MemoryStore::default();
        let uc = ListPosts {
            users: &store,
            messes: &store,
            forum: &store,
        };
        assert!(uc.execute(&PostFilter::default(), 0, 10).await.is_err());
        assert!(uc.execute(&PostFilter::default(), 1, 0).await.is_err());
        assert!(uc.execute(&PostFilter::default(), 1, 101).await.is_err());
        let empty = uc.execute(&PostFilter::default(), 1, 100).await.unwrap();
        assert_eq!(empty.pagination.total_pages, 0);
    }

    #[tokio::test]
    async fn huge_page_is_rejected_not_overflowed() {
        let store = MemoryStore::default();
        let uc = ListPosts {
            users: &store,
            messes: &store,
            forum: &store,
        };
        let err = uc
            .execute(&PostFilter::default(), i64::MAX / 10, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(err.to_string(), "Page is out of range");
        let far = uc
            .execute(&PostFilter::default(), i64::MAX / 100, 100)
            .await
            .unwrap();
        assert!(far.posts.is_empty());
    }

    #[tokio::test]
    async fn create_requires_author() {
        let store = MemoryStore::default();
        let err = CreatePost {
            users: &store,
            forum: &store,
        }
        .execute(uuid::Uuid::new_v4(), request("Hello", None))
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }
}
