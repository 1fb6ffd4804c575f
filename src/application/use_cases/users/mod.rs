pub mod delete_account;
pub mod get_user;
pub mod update_profile;

use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::User;

/// Picks the `Duplicate` error for a user write the store refused as taken.
/// The email is checked first; rows belonging to `me` are ignored.
pub(crate) async fn taken_error<R: UserRepository + ?Sized>(
    repo: &R,
    me: Option<Uuid>,
    email: Option<&str>,
    username: Option<&str>,
) -> ServiceResult<ServiceError> {
    let other = |found: Option<User>| found.is_some_and(|u| Some(u.id) != me);
    if let Some(e) = email {
        if other(repo.find_by_email(e).await?) {
            return Ok(ServiceError::Duplicate {
                field: "Email",
                value: e.to_string(),
            });
        }
    }
    if let Some(u) = username {
        if other(repo.find_by_username(u).await?) {
            return Ok(ServiceError::Duplicate {
                field: "Username",
                value: u.to_string(),
            });
        }
    }
    Err(ServiceError::Internal(anyhow::anyhow!(
        "user write refused as taken but no holder was found"
    )))
}
