use crate::domain::forum::ForumError;

/// Failure of a use case, carrying the message shown to API clients.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Invalid(String),
    #[error("{field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(what: &str) -> Self {
        ServiceError::NotFound(format!("{what} not found"))
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        ServiceError::Invalid(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ServiceError::Forbidden(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ServiceError::Unauthorized(msg.into())
    }
}

impl From<ForumError> for ServiceError {
    fn from(e: ForumError) -> Self {
        match e {
            ForumError::PollUnavailable | ForumError::CommentNotFound => {
                ServiceError::NotFound(e.to_string())
            }
            ForumError::NotCommentAuthor => ServiceError::Forbidden(e.to_string()),
        }
    }
}
