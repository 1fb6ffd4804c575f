use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::{ProfileUpdate, UserRepository};
use crate::application::use_cases::users::taken_error;
use crate::application::validation;
use crate::domain::users::User;

pub struct UpdateProfile<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl<'a, R: UserRepository + ?Sized> UpdateProfile<'a, R> {
    pub async fn execute(&self, user_id: Uuid, req: &UpdateProfileRequest) -> ServiceResult<User> {
        let current = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        let mut username = current.username.clone();
        if let Some(u) = req.username.as_deref().map(str::trim) {
            if u != current.username {
                validation::username(u)?;
                if self.repo.find_by_username(u).await?.is_some() {
                    return Err(ServiceError::Duplicate {
                        field: "Username",
                        value: u.to_string(),
                    });
                }
                username = u.to_string();
            }
        }

        let mut email = current.email.clone();
        if let Some(e) = req.email.as_deref().map(str::trim) {
            if e != current.email {
                validation::email(e)?;
                if self.repo.find_by_email(e).await?.is_some() {
                    return Err(ServiceError::Duplicate {
                        field: "Email",
                        value: e.to_string(),
                    });
                }
                email = e.to_string();
            }
        }

        match self.repo.update_profile(user_id, &username, &email).await? {
            ProfileUpdate::Updated(user) => Ok(user),
            ProfileUpdate::Missing => Err(ServiceError::not_found("User")),
            ProfileUpdate::Taken => {
                let changed_email = (email != current.email).then_some(email.as_str());
                let changed_name = (username != current.username).then_some(username.as_str());
                Err(taken_error(self.repo, Some(user_id), changed_email, changed_name).await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::LoginRole;
    use crate::testing::{MemoryStore, StaleLookups, seed_user};

    #[tokio::test]
    async fn renames_and_rejects_taken_names() {
        let store = MemoryStore::default();
        let me = seed_user(&store, "alice", LoginRole::User).await;
        seed_user(&store, "bob", LoginRole::User).await;
        let uc = UpdateProfile { repo: &store };

        let updated = uc
            .execute(
                me.id,
                &UpdateProfileRequest {
                    username: Some("alice2".into()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "alice2");
        assert_eq!(updated.email, me.email);

        let err = uc
            .execute(
                me.id,
                &UpdateProfileRequest {
                    username: Some("bob".into()),
                    email: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Username 'bob' already exists");

        // unchanged values are not treated as duplicates of themselves
        let same = uc
            .execute(
                me.id,
                &UpdateProfileRequest {
                    username: Some("alice2".into()),
                    email: Some(me.email.clone()),
                },
            )
            .await
            .unwrap();
        assert_eq!(same.username, "alice2");
    }

    #[tokio::test]
    async fn conflict_at_write_time_is_a_duplicate() {
        let store = MemoryStore::default();
        let me = seed_user(&store, "alice", LoginRole::User).await;
        seed_user(&store, "bob", LoginRole::User).await;

        let racing = StaleLookups::new(&store, 1);
        let err = UpdateProfile { repo: &racing }
            .execute(
                me.id,
                &UpdateProfileRequest {
                    username: Some("bob".into()),
                    email: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Username 'bob' already exists");

        let racing = StaleLookups::new(&store, 1);
        let err = UpdateProfile { repo: &racing }
            .execute(
                me.id,
                &UpdateProfileRequest {
                    username: None,
                    email: Some("bob@mess.in".into()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email 'bob@mess.in' already exists");

        let kept = store.find_by_id(me.id).await.unwrap().unwrap();
        assert_eq!((kept.username.as_str(), kept.email.as_str()), ("alice", "alice@mess.in"));
    }
}
