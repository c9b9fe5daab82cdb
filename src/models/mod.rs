pub mod cache;
pub mod photo;
