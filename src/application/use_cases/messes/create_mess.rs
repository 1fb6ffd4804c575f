use chrono::Utc;
use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::messes::update_mess::validate_patch;
use crate::domain::mess::{DEFAULT_MESS_IMAGE, Mess, MessPatch, NewMess};

pub struct CreateMess<'a, U, M>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
{
    pub users: &'a U,
    pub messes: &'a M,
}

#[derive(Debug, Clone, Default)]
pub struct CreateMessRequest {
    pub name: String,
    pub mobile_no: Option<String>,
    pub capacity: Option<i32>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl<'a, U, M> CreateMess<'a, U, M>
where
    U: UserRepository + ?Sized,
    M: MessRepository + ?Sized,
{
    pub async fn execute(&self, owner_id: Uuid, req: CreateMessRequest) -> ServiceResult<Mess> {
        let owner = self
            .users
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;
        validate_patch(&MessPatch {
            name: Some(req.name.clone()),
            mobile_no: req.mobile_no.clone(),
            capacity: req.capacity,
            address: req.address.clone(),
            description: req.description.clone(),
            image: None,
        })?;
        let image = req
            .image
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MESS_IMAGE.to_string());
        let mess = self
            .messes
            .create(&NewMess {
                mess_number: Utc::now().timestamp_millis(),
                name: req.name,
                mobile_no: req.mobile_no.unwrap_or_default(),
                capacity: req.capacity.unwrap_or(0),
                address: req.address.unwrap_or_default(),
                owner_id: owner.id,
                owner_number: owner.user_number,
                description: req.description.unwrap_or_default(),
                image,
            })
            .await?;
        Ok(mess)
    }
}
