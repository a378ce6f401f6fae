pub mod get_list;
pub mod structs;
