pub mod create;
pub mod structs;
