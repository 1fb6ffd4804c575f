pub mod create_menu;
pub mod delete_menu;
pub mod list_menus;
pub mod update_menu;
