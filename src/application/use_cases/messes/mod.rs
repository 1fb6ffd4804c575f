pub mod create_mess;
pub mod delete_mess;
pub mod get_mess;
pub mod list_messes;
pub mod rate_mess;
pub mod update_mess;
