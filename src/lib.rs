pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use error::{PhotoError, Result};
pub use services::lookup_cache::{LookupCache, TableSource};
pub use services::photo_service::{LookupOutcome, PhotoService};
