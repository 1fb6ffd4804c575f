use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::dto::forum::PostViewDto;
use crate::application::errors::ServiceError;
use crate::application::use_cases::forum::create_post::{CreatePost, CreatePostRequest};
use crate::application::use_cases::forum::interact::{
    AddComment, DeleteComment, LikeComment, LikePost, VotePoll,
};
use crate::application::use_cases::forum::list_posts::ListPosts;
use crate::application::use_cases::forum::manage_post::{DeletePost, EditPostRequest, UpdatePost};
use crate::bootstrap::app_context::AppContext;
use crate::domain::forum::{DEFAULT_PAGE_SIZE, ForumPost, Pagination, PostFilter, PostType};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::wire::{Message, MessBrief, Ref, UserRef};

fn default_post_type() -> PostType {
    PostType::General
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default = "default_post_type")]
    #[schema(value_type = String, example = "general")]
    pub post_type: PostType,
    pub mess_id: Option<Uuid>,
    pub poll_options: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditPostBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default = "default_post_type")]
    #[schema(value_type = String, example = "poll")]
    pub post_type: PostType,
    pub poll_options: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentBody {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteBody {
    pub option_index: i64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PostQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub mess_id: Option<String>,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub search: Option<String>,
}

impl PostQuery {
    fn filter(&self) -> ApiResult<PostFilter> {
        let non_blank = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let mess_id = non_blank(&self.mess_id)
            .map(|s| Uuid::parse_str(&s).map_err(|_| ServiceError::invalid("Invalid mess id")))
            .transpose()?;
        let post_type = non_blank(&self.post_type)
            .map(|s| {
                s.parse::<PostType>()
                    .map_err(|_| ServiceError::invalid("Invalid post type"))
            })
            .transpose()?;
        Ok(PostFilter {
            mess_id,
            post_type,
            search: non_blank(&self.search),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentOut {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(value_type = Object)]
    pub user_id: Ref<UserRef>,
    pub content: String,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PollOptionOut {
    pub text: String,
    pub votes: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostOut {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    pub title: String,
    pub content: String,
    #[schema(value_type = Object)]
    pub author: Ref<UserRef>,
    #[schema(value_type = Option<Object>)]
    pub mess_id: Option<Ref<MessBrief>>,
    #[serde(rename = "type")]
    pub post_type: String,
    pub tags: Vec<String>,
    pub likes: Vec<Uuid>,
    pub comments: Vec<CommentOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_options: Option<Vec<PollOptionOut>>,
    pub is_poll_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostViewDto> for PostOut {
    fn from(v: PostViewDto) -> Self {
        let PostViewDto {
            post,
            author,
            mess,
            comment_authors,
            ..
        } = v;
        let comments = post
            .comments
            .into_iter()
            .map(|c| CommentOut {
                id: c.id,
                user_id: Ref::resolve(c.user_id, comment_authors.get(&c.user_id).map(UserRef::name_only)),
                content: c.content,
                likes: c.likes,
                created_at: c.created_at,
            })
            .collect();
        Self {
            id: post.id,
            record_id: post.id,
            title: post.title,
            content: post.content,
            author: Ref::resolve(post.author_id, author.as_ref().map(UserRef::name_only)),
            mess_id: post
                .mess_id
                .map(|id| Ref::resolve(id, mess.as_ref().map(MessBrief::name_only))),
            post_type: post.post_type.as_str().to_string(),
            tags: post.tags,
            likes: post.likes,
            comments,
            poll_options: post.poll_options.map(|opts| {
                opts.into_iter()
                    .map(|o| PollOptionOut {
                        text: o.text,
                        votes: o.votes,
                    })
                    .collect()
            }),
            is_poll_active: post.is_poll_active,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<ForumPost> for PostOut {
    fn from(post: ForumPost) -> Self {
        PostViewDto::bare(post).into()
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOut {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_posts: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl From<Pagination> for PaginationOut {
    fn from(p: Pagination) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            total_posts: p.total_posts,
            has_next_page: p.has_next_page,
            has_prev_page: p.has_prev_page,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostPage {
    pub posts: Vec<PostOut>,
    pub pagination: PaginationOut,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/create/:user_id", post(create_post))
        .route("/posts/:post_id/comment/:user_id", post(add_comment))
        .route("/posts/:post_id/vote/:user_id", post(vote_poll))
        .route("/posts/:post_id/like/:user_id", post(like_post))
        .route(
            "/posts/:post_id/comments/:comment_id/like/:user_id",
            post(like_comment),
        )
        .route(
            "/posts/:post_id/comments/:comment_id/:user_id",
            delete(delete_comment),
        )
        .route("/posts/:post_id/:user_id", put(update_post).delete(delete_post))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/forum/posts/create/{user_id}", tag = "Forum", request_body = CreatePostBody,
    params(("user_id" = Uuid, Path, description = "Author")),
    responses(
        (status = 201, body = PostOut),
        (status = 400, body = crate::presentation::http::error::ErrorBody),
        (status = 404, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn create_post(
    State(ctx): State<AppContext>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<CreatePostBody>,
) -> ApiResult<(StatusCode, Json<PostOut>)> {
    let users = ctx.user_repo();
    let forum = ctx.forum_repo();
    let uc = CreatePost {
        users: users.as_ref(),
        forum: forum.as_ref(),
    };
    let post = uc
        .execute(
            user_id,
            CreatePostRequest {
                title: body.title,
                content: body.content,
                post_type: body.post_type,
                mess_id: body.mess_id,
                poll_options: body.poll_options,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[utoipa::path(get, path = "/api/forum/posts", tag = "Forum", params(PostQuery),
    responses((status = 200, body = PostPage), (status = 400, body = crate::presentation::http::error::ErrorBody)))]
pub async fn list_posts(
    State(ctx): State<AppContext>,
    Query(q): Query<PostQuery>,
) -> ApiResult<Json<PostPage>> {
    let filter = q.filter()?;
    let users = ctx.user_repo();
    let messes = ctx.mess_repo();
    let forum = ctx.forum_repo();
    let uc = ListPosts {
        users: users.as_ref(),
        messes: messes.as_ref(),
        forum: forum.as_ref(),
    };
    let page = uc
        .execute(
            &filter,
            q.page.unwrap_or(1),
            q.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;
    Ok(Json(PostPage {
        posts: page.posts.into_iter().map(Into::into).collect(),
        pagination: page.pagination.into(),
    }))
}

#[utoipa::path(post, path = "/api/forum/posts/{post_id}/comment/{user_id}", tag = "Forum", request_body = CommentBody,
    params(("post_id" = Uuid, Path, description = "Post id"), ("user_id" = Uuid, Path, description = "Commenter")),
    responses((status = 200, body = PostOut), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn add_comment(
    State(ctx): State<AppContext>,
    Path((post_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<CommentBody>,
) -> ApiResult<Json<PostOut>> {
    let users = ctx.user_repo();
    let messes = ctx.mess_repo();
    let forum = ctx.forum_repo();
    let uc = AddComment {
        users: users.as_ref(),
        messes: messes.as_ref(),
        forum: forum.as_ref(),
    };
    let view = uc.execute(post_id, user_id, body.content).await?;
    Ok(Json(view.into()))
}

#[utoipa::path(post, path = "/api/forum/posts/{post_id}/vote/{user_id}", tag = "Forum", request_body = VoteBody,
    params(("post_id" = Uuid, Path, description = "Poll post id"), ("user_id" = Uuid, Path, description = "Voter")),
    responses((status = 200, body = PostOut), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn vote_poll(
    State(ctx): State<AppContext>,
    Path((post_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<VoteBody>,
) -> ApiResult<Json<PostOut>> {
    let users = ctx.user_repo();
    let forum = ctx.forum_repo();
    let uc = VotePoll {
        users: users.as_ref(),
        forum: forum.as_ref(),
    };
    let post = uc.execute(post_id, user_id, body.option_index).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(post, path = "/api/forum/posts/{post_id}/like/{user_id}", tag = "Forum",
    params(("post_id" = Uuid, Path, description = "Post id"), ("user_id" = Uuid, Path, description = "Liker")),
    responses((status = 200, body = PostOut), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn like_post(
    State(ctx): State<AppContext>,
    Path((post_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<PostOut>> {
    let forum = ctx.forum_repo();
    let uc = LikePost {
        forum: forum.as_ref(),
    };
    let post = uc.execute(post_id, user_id).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(post, path = "/api/forum/posts/{post_id}/comments/{comment_id}/like/{user_id}", tag = "Forum",
    params(
        ("post_id" = Uuid, Path, description = "Post id"),
        ("comment_id" = Uuid, Path, description = "Comment id"),
        ("user_id" = Uuid, Path, description = "Liker")
    ),
    responses((status = 200, body = PostOut), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn like_comment(
    State(ctx): State<AppContext>,
    Path((post_id, comment_id, user_id)): Path<(Uuid, Uuid, Uuid)>,
) -> ApiResult<Json<PostOut>> {
    let forum = ctx.forum_repo();
    let uc = LikeComment {
        forum: forum.as_ref(),
    };
    let post = uc.execute(post_id, comment_id, user_id).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(delete, path = "/api/forum/posts/{post_id}/comments/{comment_id}/{user_id}", tag = "Forum",
    params(
        ("post_id" = Uuid, Path, description = "Post id"),
        ("comment_id" = Uuid, Path, description = "Comment id"),
        ("user_id" = Uuid, Path, description = "Comment author")
    ),
    responses(
        (status = 200, body = PostOut),
        (status = 403, body = crate::presentation::http::error::ErrorBody),
        (status = 404, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn delete_comment(
    State(ctx): State<AppContext>,
    Path((post_id, comment_id, user_id)): Path<(Uuid, Uuid, Uuid)>,
) -> ApiResult<Json<PostOut>> {
    let forum = ctx.forum_repo();
    let uc = DeleteComment {
        forum: forum.as_ref(),
    };
    let post = uc.execute(post_id, comment_id, user_id).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(put, path = "/api/forum/posts/{post_id}/{user_id}", tag = "Forum", request_body = EditPostBody,
    params(("post_id" = Uuid, Path, description = "Post id"), ("user_id" = Uuid, Path, description = "Author")),
    responses(
        (status = 200, body = PostOut),
        (status = 403, body = crate::presentation::http::error::ErrorBody),
        (status = 404, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn update_post(
    State(ctx): State<AppContext>,
    Path((post_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<EditPostBody>,
) -> ApiResult<Json<PostOut>> {
    let forum = ctx.forum_repo();
    let uc = UpdatePost {
        forum: forum.as_ref(),
    };
    let post = uc
        .execute(
            post_id,
            user_id,
            EditPostRequest {
                title: body.title,
                content: body.content,
                post_type: body.post_type,
                poll_options: body.poll_options,
            },
        )
        .await?;
    Ok(Json(post.into()))
}

#[utoipa::path(delete, path = "/api/forum/posts/{post_id}/{user_id}", tag = "Forum",
    params(("post_id" = Uuid, Path, description = "Post id"), ("user_id" = Uuid, Path, description = "Author")),
    responses(
        (status = 200, body = Message),
        (status = 403, body = crate::presentation::http::error::ErrorBody),
        (status = 404, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn delete_post(
    State(ctx): State<AppContext>,
    Path((post_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Message>> {
    let forum = ctx.forum_repo();
    let uc = DeletePost {
        forum: forum.as_ref(),
    };
    uc.execute(post_id, user_id).await?;
    Ok(Json(Message::new("Post deleted successfully")))
}
