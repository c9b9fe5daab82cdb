pub mod lookup_cache;
pub mod photo_service;
