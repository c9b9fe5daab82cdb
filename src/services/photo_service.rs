use crate::api::photo_api::PhotoApi;
use crate::config::Config;
use crate::error::{PhotoError, Result};
use crate::models::photo::{GalleryRecord, LookupRecord, LookupTable};
use crate::services::lookup_cache::LookupCache;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found { code: String, record: LookupRecord },
    /// `available` holds the known codes, sorted, for diagnostics.
    NotFound { code: String, available: Vec<String> },
}

impl LookupOutcome {
    pub fn code(&self) -> &str {
        match self {
            LookupOutcome::Found { code, .. } | LookupOutcome::NotFound { code, .. } => code,
        }
    }

    pub fn into_result(self) -> Result<(String, LookupRecord)> {
        match self {
            LookupOutcome::Found { code, record } => Ok((code, record)),
            LookupOutcome::NotFound { code, .. } => Err(PhotoError::NotFound(code)),
        }
    }
}

/// Trims surrounding whitespace and upper-cases a user supplied code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Exact match of the normalized code against the table.
pub fn lookup(table: &LookupTable, code: &str) -> LookupOutcome {
    let code = normalize_code(code);
    match table.get(&code) {
        Some(record) => LookupOutcome::Found {
            code,
            record: record.clone(),
        },
        None => {
            let mut available: Vec<String> = table.keys().cloned().collect();
            available.sort();
            LookupOutcome::NotFound { code, available }
        }
    }
}

pub struct PhotoService {
    cache: LookupCache<PhotoApi>,
}

impl PhotoService {
    pub fn new(api: PhotoApi, cache_ttl: Duration) -> Self {
        Self {
            cache: LookupCache::new(api, cache_ttl),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(PhotoApi::from_config(config), config.cache_ttl)
    }

    pub fn cache(&self) -> &LookupCache<PhotoApi> {
        &self.cache
    }

    /// Warms the cache. Failures are logged and otherwise ignored.
    pub async fn preload(&self) {
        if let Err(e) = self.cache.get_table().await {
            warn!("Failed to preload photo table: {}", e);
        }
    }

    pub async fn find_photo(&self, code: &str) -> Result<LookupOutcome> {
        let normalized = normalize_code(code);
        info!("Searching for photo code: {}", normalized);
        if normalized.is_empty() {
            return Ok(LookupOutcome::NotFound {
                code: normalized,
                available: Vec::new(),
            });
        }

        let table = self.cache.get_table().await?;
        let outcome = lookup(&table, &normalized);
        match &outcome {
            LookupOutcome::Found { code, record } => {
                debug!("Photo found: {} -> {:?}", code, record.download_url)
            }
            LookupOutcome::NotFound { code, available } => {
                debug!("Photo {} not found. Available codes: {:?}", code, available)
            }
        }
        Ok(outcome)
    }

    /// Gallery listing, always fetched fresh.
    pub async fn fetch_gallery(&self) -> Result<Vec<GalleryRecord>> {
        self.cache.source().fetch_gallery_list().await
    }
}
