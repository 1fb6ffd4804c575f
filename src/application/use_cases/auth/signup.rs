use chrono::Utc;
use tracing::info;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::passwords::hash_password;
use crate::application::use_cases::users::taken_error;
use crate::application::validation;
use crate::domain::users::{LoginRole, NewUser, User, user_number_at};

pub struct Signup<'a, U: UserRepository + ?Sized> {
    pub users: &'a U,
}

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub login_role: LoginRole,
}

impl<'a, U: UserRepository + ?Sized> Signup<'a, U> {
    pub async fn execute(&self, req: &SignupRequest) -> ServiceResult<User> {
        let username = req.username.trim();
        let email = req.email.trim();
        if username.is_empty() || email.is_empty() || req.password.is_empty() {
            return Err(ServiceError::invalid("All fields are required"));
        }
        validation::username(username)?;
        validation::email(email)?;
        validation::password(&req.password)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(ServiceError::Duplicate {
                field: "Email",
                value: email.to_string(),
            });
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(ServiceError::Duplicate {
                field: "Username",
                value: username.to_string(),
            });
        }

        let now = Utc::now();
        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(&req.password)?,
            login_role: req.login_role,
            user_number: user_number_at(now),
        };
        let created = if new_user.login_role == LoginRole::MessOwner {
            self.users.create_owner(&new_user, now).await?.map(|(user, mess)| {
                info!(user_id = %user.id, mess_id = %mess.id, "default_mess_created");
                user
            })
        } else {
            self.users.create_user(&new_user).await?
        };
        let Some(user) = created else {
            return Err(taken_error(self.users, None, Some(email), Some(username)).await?);
        };
        Ok(user)
    }
}
