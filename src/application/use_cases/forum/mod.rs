pub mod create_post;
pub mod interact;
pub mod list_posts;
pub mod manage_post;
