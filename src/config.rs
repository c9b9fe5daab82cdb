//! Endpoint and cache settings, read from the environment.

use std::env;
use std::time::Duration;

pub const DEFAULT_PHOTO_API_URL: &str = "https://script.google.com/macros/s/AKfycbzZS8EpN2rGe4HgNfZK6p8OEr8g4qRNCb3b1yuLnF1SYGVGz13ir_gksE2D4HOfUbrO/exec";
pub const DEFAULT_GALLERY_API_URL: &str = "https://script.google.com/macros/s/AKfycbwt1KLPpJyRhvBVn-NxYHckvsloYA8kClWpIYzUe5awunF_ghAwpdZaVvqy7YY1D1mbyQ/exec";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint serving the code -> photo table
    pub photo_api_url: String,
    /// Endpoint serving the gallery list
    pub gallery_api_url: String,
    /// How long a fetched table is served from memory
    pub cache_ttl: Duration,
}

impl Config {
    /// Loads settings from the environment, falling back to defaults.
    ///
    /// # Environment Variables
    /// - `PHOTO_API_URL` - photo table endpoint
    /// - `GALLERY_API_URL` - gallery endpoint
    /// - `CACHE_TTL_SECS` - freshness window in seconds (default: 300)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            photo_api_url: env::var("PHOTO_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.photo_api_url),
            gallery_api_url: env::var("GALLERY_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.gallery_api_url),
            cache_ttl: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            photo_api_url: DEFAULT_PHOTO_API_URL.to_string(),
            gallery_api_url: DEFAULT_GALLERY_API_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}
