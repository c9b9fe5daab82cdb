pub mod photo_api;
