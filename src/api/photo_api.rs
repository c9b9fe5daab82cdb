use crate::config::Config;
use crate::error::{PhotoError, Result};
use crate::models::photo::{GalleryRecord, GalleryResponse, LookupTable, PhotoTableResponse};
use crate::services::lookup_cache::TableSource;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, error, info};

pub struct PhotoApi {
    client: Client,
    photo_url: String,
    gallery_url: String,
}

impl PhotoApi {
    pub fn new(photo_url: impl Into<String>, gallery_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            photo_url: photo_url.into(),
            gallery_url: gallery_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.photo_api_url, &config.gallery_api_url)
    }

    /// One uncached GET of the photo table.
    pub async fn fetch_photo_table(&self) -> Result<LookupTable> {
        info!("Fetching photo table from {}", self.photo_url);
        let response = self
            .client
            .get(&self.photo_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .inspect_err(|e| error!("Photo table request failed: {}", e))?;

        let status = response.status();
        debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(PhotoError::RemoteFetch {
                status: status.as_u16(),
            });
        }

        let body: PhotoTableResponse = response.json().await?;
        if !body.success {
            let message = body
                .message
                .unwrap_or_else(|| "Failed to fetch photos".to_string());
            error!("Photo endpoint reported failure: {}", message);
            return Err(PhotoError::RemoteApplication { message });
        }

        let table = body.photos.unwrap_or_default();
        debug!("Parsed {} photo codes", table.len());
        Ok(table)
    }

    /// One uncached GET of the gallery, normalized to a flat record list.
    pub async fn fetch_gallery_list(&self) -> Result<Vec<GalleryRecord>> {
        debug!("Sending request to {}", self.gallery_url);
        let response = self.client.get(&self.gallery_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::RemoteFetch {
                status: status.as_u16(),
            });
        }

        let body: GalleryResponse = response.json().await?;
        if !body.success {
            return Err(PhotoError::RemoteApplication {
                message: body
                    .message
                    .unwrap_or_else(|| "Failed to load gallery".to_string()),
            });
        }

        let records = body.into_payload().into_records();
        debug!("Gallery holds {} photos", records.len());
        Ok(records)
    }
}

#[async_trait]
impl TableSource for PhotoApi {
    async fn fetch_table(&self) -> Result<LookupTable> {
        self.fetch_photo_table().await
    }
}
