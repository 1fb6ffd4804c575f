use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

string_enum!(PostType, "post type" {
    General => "general",
    Question => "question",
    Announcement => "announcement",
    Poll => "poll",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    #[serde(default)]
    pub votes: Vec<Uuid>,
}

impl PollOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            votes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForumPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub mess_id: Option<Uuid>,
    pub post_type: PostType,
    pub tags: Vec<String>,
    pub likes: Vec<Uuid>,
    pub comments: Vec<Comment>,
    pub poll_options: Option<Vec<PollOption>>,
    pub is_poll_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ForumError {
    #[error("Poll not found or inactive")]
    PollUnavailable,
    #[error("Comment not found")]
    CommentNotFound,
    #[error("You can only delete your own comments")]
    NotCommentAuthor,
}

fn toggle(list: &mut Vec<Uuid>, user_id: Uuid) -> bool {
    if let Some(pos) = list.iter().position(|u| *u == user_id) {
        list.remove(pos);
        false
    } else {
        list.push(user_id);
        true
    }
}

impl ForumPost {
    pub fn new(
        author_id: Uuid,
        title: String,
        content: String,
        post_type: PostType,
        mess_id: Option<Uuid>,
        poll_texts: Option<Vec<String>>,
        now: DateTime<Utc>,
    ) -> Self {
        let poll_options = match (post_type, poll_texts) {
            (PostType::Poll, Some(texts)) if !texts.is_empty() => {
                Some(texts.into_iter().map(PollOption::new).collect())
            }
            _ => None,
        };
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            author_id,
            mess_id,
            post_type,
            tags: Vec::new(),
            likes: Vec::new(),
            comments: Vec::new(),
            poll_options,
            is_poll_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether the user now likes the post.
    pub fn toggle_like(&mut self, user_id: Uuid, now: DateTime<Utc>) -> bool {
        let liked = toggle(&mut self.likes, user_id);
        self.updated_at = now;
        liked
    }

    pub fn add_comment(&mut self, user_id: Uuid, content: String, now: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        self.comments.push(Comment {
            id,
            user_id,
            content,
            likes: Vec::new(),
            created_at: now,
        });
        self.updated_at = now;
        id
    }

    pub fn toggle_comment_like(
        &mut self,
        comment_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, ForumError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or(ForumError::CommentNotFound)?;
        let liked = toggle(&mut comment.likes, user_id);
        self.updated_at = now;
        Ok(liked)
    }

    pub fn remove_comment(
        &mut self,
        comment_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), ForumError> {
        let pos = self
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or(ForumError::CommentNotFound)?;
        if self.comments[pos].user_id != user_id {
            return Err(ForumError::NotCommentAuthor);
        }
        self.comments.remove(pos);
        self.updated_at = now;
        Ok(())
    }

    pub fn has_open_poll(&self) -> bool {
        self.is_poll_active && self.poll_options.as_ref().is_some_and(|o| !o.is_empty())
    }

    /// Replaces the user's vote. An out-of-range index only withdraws it.
    pub fn vote(&mut self, user_id: Uuid, option_index: i64, now: DateTime<Utc>) -> Result<(), ForumError> {
        if !self.has_open_poll() {
            return Err(ForumError::PollUnavailable);
        }
        let Some(options) = self.poll_options.as_mut() else {
            return Err(ForumError::PollUnavailable);
        };
        for option in options.iter_mut() {
            option.votes.retain(|v| *v != user_id);
        }
        if let Some(option) = usize::try_from(option_index)
            .ok()
            .and_then(|i| options.get_mut(i))
        {
            option.votes.push(user_id);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Rewrites title, body and type. New poll option texts keep the votes of an
    /// existing option with the same text.
    pub fn edit(
        &mut self,
        title: String,
        content: String,
        post_type: PostType,
        poll_texts: Option<Vec<String>>,
        now: DateTime<Utc>,
    ) {
        self.title = title;
        self.content = content;
        self.post_type = post_type;
        if let (PostType::Poll, Some(texts)) = (post_type, poll_texts) {
            if !texts.is_empty() {
                let existing = self.poll_options.take().unwrap_or_default();
                let reconciled = texts
                    .into_iter()
                    .map(|text| {
                        existing
                            .iter()
                            .find(|o| o.text == text)
                            .cloned()
                            .unwrap_or_else(|| PollOption::new(text))
                    })
                    .collect();
                self.poll_options = Some(reconciled);
            }
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub mess_id: Option<Uuid>,
    pub post_type: Option<PostType>,
    pub search: Option<String>,
}

impl PostFilter {
    pub fn matches(&self, post: &ForumPost) -> bool {
        if self.mess_id.is_some() && post.mess_id != self.mess_id {
            return false;
        }
        if self.post_type.is_some_and(|t| t != post.post_type) {
            return false;
        }
        match self.search.as_deref() {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                post.title.to_lowercase().contains(&term)
                    || post.content.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }
}

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_posts: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total_posts: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_posts + limit - 1) / limit
        } else {
            0
        };
        Self {
            current_page: page,
            total_pages,
            total_posts,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }

    /// Row offset of `page`, or `None` when it does not fit in an `i64`.
    pub fn offset(page: i64, limit: i64) -> Option<i64> {
        (page - 1).max(0).checked_mul(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll(now: DateTime<Utc>) -> ForumPost {
        ForumPost::new(
            Uuid::new_v4(),
            "Lunch timing".into(),
            "Which slot works?".into(),
            PostType::Poll,
            None,
            Some(vec!["12:00".into(), "13:00".into()]),
            now,
        )
    }

    #[test]
    fn poll_options_only_for_polls() {
        let now = Utc::now();
        let post = ForumPost::new(
            Uuid::new_v4(),
            "t".into(),
            "c".into(),
            PostType::General,
            None,
            Some(vec!["a".into()]),
            now,
        );
        assert!(post.poll_options.is_none());
        assert_eq!(poll(now).poll_options.unwrap().len(), 2);
    }

    #[test]
    fn like_toggles() {
        let now = Utc::now();
        let mut post = poll(now);
        let user = Uuid::new_v4();
        assert!(post.toggle_like(user, now));
        assert_eq!(post.likes, vec![user]);
        assert!(!post.toggle_like(user, now));
        assert!(post.likes.is_empty());
    }

    #[test]
    fn revote_moves_the_vote() {
        let now = Utc::now();
        let mut post = poll(now);
        let user = Uuid::new_v4();
        post.vote(user, 0, now).unwrap();
        post.vote(user, 1, now).unwrap();
        let opts = post.poll_options.as_ref().unwrap();
        assert!(opts[0].votes.is_empty());
        assert_eq!(opts[1].votes, vec![user]);

        post.vote(user, 7, now).unwrap();
        let opts = post.poll_options.as_ref().unwrap();
        assert!(opts.iter().all(|o| o.votes.is_empty()));
    }

    #[test]
    fn voting_on_closed_poll_fails() {
        let now = Utc::now();
        let mut post = poll(now);
        post.is_poll_active = false;
        assert_eq!(
            post.vote(Uuid::new_v4(), 0, now),
            Err(ForumError::PollUnavailable)
        );
        post.is_poll_active = true;
        post.poll_options = None;
        assert_eq!(
            post.vote(Uuid::new_v4(), 0, now),
            Err(ForumError::PollUnavailable)
        );
    }

    #[test]
    fn comment_lifecycle() {
        let now = Utc::now();
        let mut post = poll(now);
        let author = Uuid::new_v4();
        let other = Uuid::new_v4();
        let cid = post.add_comment(author, "12 is fine".into(), now);
        assert_eq!(post.toggle_comment_like(cid, other, now), Ok(true));
        assert_eq!(post.comments[0].likes, vec![other]);
        assert_eq!(
            post.toggle_comment_like(Uuid::new_v4(), other, now),
            Err(ForumError::CommentNotFound)
        );
        assert_eq!(
            post.remove_comment(cid, other, now),
            Err(ForumError::NotCommentAuthor)
        );
        assert_eq!(post.remove_comment(cid, author, now), Ok(()));
        assert!(post.comments.is_empty());
    }

    #[test]
    fn edit_keeps_votes_on_unchanged_options() {
        let now = Utc::now();
        let mut post = poll(now);
        let voter = Uuid::new_v4();
        post.vote(voter, 1, now).unwrap();
        post.edit(
            "Lunch timing".into(),
            "Updated".into(),
            PostType::Poll,
            Some(vec!["13:00".into(), "14:00".into()]),
            now,
        );
        let opts = post.poll_options.unwrap();
        assert_eq!(opts[0].text, "13:00");
        assert_eq!(opts[0].votes, vec![voter]);
        assert_eq!(opts[1], PollOption::new("14:00"));
    }

    #[test]
    fn filter_search_is_case_insensitive_on_title_or_content() {
        let now = Utc::now();
        let post = poll(now);
        let f = PostFilter {
            search: Some("SLOT".into()),
            ..Default::default()
        };
        assert!(f.matches(&post));
        let f = PostFilter {
            post_type: Some(PostType::Question),
            ..Default::default()
        };
        assert!(!f.matches(&post));
        let f = PostFilter {
            mess_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(!f.matches(&post));
    }

    #[test]
    fn pagination_math() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!((p.total_pages, p.has_next_page, p.has_prev_page), (0, false, false));
        let p = Pagination::new(2, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next_page && p.has_prev_page);
        let p = Pagination::new(3, 10, 30);
        assert!(!p.has_next_page);
        assert_eq!(Pagination::offset(3, 10), Some(20));
        assert_eq!(Pagination::offset(i64::MAX / 10, 100), None);
    }
}
