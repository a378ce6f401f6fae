pub mod appearance;
pub mod episode;
pub mod guest;
pub mod health;
mod utils;
