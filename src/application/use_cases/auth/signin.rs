use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::passwords::verify_password;
use crate::domain::users::{LoginRole, User};

pub struct Signin<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
    pub login_role: LoginRole,
}

impl<'a, R: UserRepository + ?Sized> Signin<'a, R> {
    /// Unknown user, wrong role and wrong password all fail the same way.
    pub async fn execute(&self, req: &SigninRequest) -> ServiceResult<User> {
        let username = req.username.trim();
        if username.is_empty() || req.password.is_empty() {
            return Err(ServiceError::invalid("All fields are required"));
        }
        let user = match self.repo.find_by_username(username).await? {
            Some(u) if u.login_role == req.login_role => u,
            _ => return Err(ServiceError::invalid("Invalid credentials")),
        };
        if !verify_password(&req.password, &user.password_hash) {
            return Err(ServiceError::invalid("Invalid credentials"));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, seed_user};

    #[tokio::test]
    async fn signin_checks_role_and_password() {
        let store = MemoryStore::default();
        seed_user(&store, "owner", LoginRole::MessOwner).await;
        let uc = Signin { repo: &store };

        let ok = uc
            .execute(&SigninRequest {
                username: "owner".into(),
                password: "secret123".into(),
                login_role: LoginRole::MessOwner,
            })
            .await
            .unwrap();
        assert_eq!(ok.username, "owner");

        for (password, role) in [
            ("secret123", LoginRole::User),
            ("wrong-pass", LoginRole::MessOwner),
        ] {
            let err = uc
                .execute(&SigninRequest {
                    username: "owner".into(),
                    password: password.into(),
                    login_role: role,
                })
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Invalid credentials");
        }
    }
}
