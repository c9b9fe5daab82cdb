use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A photo entry in the lookup table. Only the download link is interpreted;
/// every other field the endpoint sends is kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRecord {
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Upper-cased photo code -> record.
pub type LookupTable = HashMap<String, LookupRecord>;

#[derive(Debug, Deserialize)]
pub struct PhotoTableResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub photos: Option<LookupTable>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One gallery entry. Fields of the wrong type read as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub download_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub view_url: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Gallery endpoint body. Either `categories` or `photos` is present.
/// Entries stay raw until [`GalleryPayload::into_records`] so one bad item
/// cannot sink the whole list.
#[derive(Debug, Deserialize)]
pub struct GalleryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub categories: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub photos: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum GalleryPayload {
    Categories(BTreeMap<String, Value>),
    Photos(BTreeMap<String, Value>),
    Empty,
}

impl GalleryResponse {
    /// `categories` wins when both shapes are present.
    pub fn into_payload(self) -> GalleryPayload {
        match (self.categories, self.photos) {
            (Some(categories), _) => GalleryPayload::Categories(categories),
            (None, Some(photos)) => GalleryPayload::Photos(photos),
            (None, None) => GalleryPayload::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryRecord {
    pub filename: String,
    pub image_url: String,
    pub view_url: Option<String>,
}

impl GalleryItem {
    fn from_value(value: Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!("Skipping malformed gallery item: {}", e);
                None
            }
        }
    }

    fn into_record(self) -> Option<GalleryRecord> {
        let filename = self.filename.unwrap_or_default();
        let image_url = self
            .download_url
            .filter(|u| !u.is_empty())
            .or(self.url.filter(|u| !u.is_empty()));

        match image_url {
            Some(image_url) => Some(GalleryRecord {
                filename,
                image_url,
                view_url: self.view_url,
            }),
            None => {
                debug!("Skipping gallery item without an image url: {}", filename);
                None
            }
        }
    }
}

fn category_items(name: String, items: Value) -> Vec<Value> {
    match items {
        Value::Array(items) => items,
        _ => {
            debug!("Skipping gallery category {} that is not a list", name);
            Vec::new()
        }
    }
}

impl GalleryPayload {
    pub fn into_records(self) -> Vec<GalleryRecord> {
        let items: Vec<Value> = match self {
            GalleryPayload::Categories(categories) => categories
                .into_iter()
                .flat_map(|(name, items)| category_items(name, items))
                .collect(),
            GalleryPayload::Photos(photos) => photos.into_values().collect(),
            GalleryPayload::Empty => Vec::new(),
        };

        items
            .into_iter()
            .filter_map(GalleryItem::from_value)
            .filter_map(GalleryItem::into_record)
            .collect()
    }
}
