pub mod list_check_ins;
pub mod record_check_in;
