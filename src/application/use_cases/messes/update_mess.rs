use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::mess_repository::MessRepository;
use crate::application::validation;
use crate::domain::mess::{
    ADDRESS_MAX_LEN, DESCRIPTION_MAX_LEN, MOBILE_MAX_LEN, Mess, MessPatch, NAME_MAX_LEN,
};

pub(crate) fn validate_patch(patch: &MessPatch) -> ServiceResult<()> {
    if let Some(name) = &patch.name {
        validation::length("Mess name", name.trim(), 1, NAME_MAX_LEN)?;
    }
    if let Some(mobile) = &patch.mobile_no {
        validation::max_length("Mobile number", mobile, MOBILE_MAX_LEN)?;
    }
    if let Some(capacity) = patch.capacity {
        if capacity < 0 {
            return Err(ServiceError::invalid("Capacity cannot be negative"));
        }
    }
    if let Some(address) = &patch.address {
        validation::max_length("Address", address, ADDRESS_MAX_LEN)?;
    }
    if let Some(description) = &patch.description {
        validation::max_length("Description", description, DESCRIPTION_MAX_LEN)?;
    }
    Ok(())
}

pub struct UpdateMess<'a, R: MessRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MessRepository + ?Sized> UpdateMess<'a, R> {
    /// Updates the mess run by `owner_id`.
    pub async fn by_owner(&self, owner_id: Uuid, patch: MessPatch) -> ServiceResult<Mess> {
        let mess = self
            .repo
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mess"))?;
        self.apply(mess, patch).await
    }

    /// Updates mess `mess_id` on behalf of `actor_id`, who must own it.
    pub async fn owned(&self, mess_id: Uuid, actor_id: Uuid, patch: MessPatch) -> ServiceResult<Mess> {
        let mess = self
            .repo
            .find_by_id(mess_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mess"))?;
        if mess.owner_id != actor_id {
            return Err(ServiceError::forbidden("You can only update your own mess"));
        }
        self.apply(mess, patch).await
    }

    async fn apply(&self, mut mess: Mess, patch: MessPatch) -> ServiceResult<Mess> {
        validate_patch(&patch)?;
        patch.apply(&mut mess);
        Ok(self.repo.save(&mess).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::LoginRole;
    use crate::testing::{MemoryStore, seed_mess, seed_user};

    #[tokio::test]
    async fn only_owner_may_update() {
        let store = MemoryStore::default();
        let owner = seed_user(&store, "owner", LoginRole::MessOwner).await;
        let other = seed_user(&store, "other", LoginRole::MessOwner).await;
        let mess = seed_mess(&store, &owner, "Golden").await;
        let uc = UpdateMess { repo: &store };

        let err = uc
            .owned(mess.id, other.id, MessPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "You can only update your own mess");

        let updated = uc
            .owned(
                mess.id,
                owner.id,
                MessPatch {
                    name: Some("Silver".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Silver");
    }

    #[tokio::test]
    async fn by_owner_validates_lengths() {
        let store = MemoryStore::default();
        let owner = seed_user(&store, "owner", LoginRole::MessOwner).await;
        seed_mess(&store, &owner, "Golden").await;
        let uc = UpdateMess { repo: &store };
        let err = uc
            .by_owner(
                owner.id,
                MessPatch {
                    mobile_no: Some("1".repeat(16)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        let err = uc
            .by_owner(Uuid::new_v4(), MessPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Mess not found");
    }
}
