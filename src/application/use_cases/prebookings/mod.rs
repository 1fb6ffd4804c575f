pub mod create_prebooking;
pub mod list_prebookings;
pub mod update_prebooking;
