use crate::domain::mess::Mess;
use crate::domain::prebooking::Prebooking;
use crate::domain::users::User;

#[derive(Debug, Clone)]
pub struct PrebookingWithMessDto {
    pub prebooking: Prebooking,
    pub mess: Option<Mess>,
}

#[derive(Debug, Clone)]
pub struct PrebookingWithUserDto {
    pub prebooking: Prebooking,
    pub user: Option<User>,
}
