pub mod current_passes;
pub mod validate_pass;
