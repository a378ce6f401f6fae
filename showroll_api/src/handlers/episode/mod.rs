pub mod delete;
pub mod get_list;
pub mod get_one;
pub mod structs;
