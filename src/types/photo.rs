//! Photo resources returned by the photo endpoint family.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::User;
use crate::downloader::truncate_body;
use crate::normalize::{nest_photographer, Payload};
use crate::Error;

/// One page of photo results.
#[derive(Serialize, Deserialize)]
pub struct PhotoPage {
    /// Total number of results across all pages.
    pub total_results: u64,

    /// 1-based index of this page.
    pub page: u32,

    /// Page size that was requested from the API.
    pub per_page: u32,

    /// The photos on this page.
    pub photos: Vec<Photo>,

    /// URL of the next page, when the server reports one.
    pub next_page: Option<String>,
}

impl Payload for PhotoPage {
    fn prepare(raw: &mut Value) {
        if let Some(photos) = raw.get_mut("photos").and_then(Value::as_array_mut) {
            for photo in photos {
                nest_photographer(photo);
            }
        }
    }
}

/// A single photo with its rendition URLs.
#[derive(Serialize, Deserialize)]
pub struct Photo {
    /// Numeric photo identifier.
    pub id: u64,

    /// Pixel width of the original file.
    pub width: u32,

    /// Pixel height of the original file.
    pub height: u32,

    /// Web page for this photo.
    pub url: String,

    /// Who took the photo.
    pub user: User,

    /// Average color as a hex string (e.g. "#978E82").
    pub avg_color: String,

    /// File URLs keyed by rendition name ("original", "large2x", ...).
    pub src: HashMap<String, String>,

    /// Whether the requesting account has liked this photo.
    pub liked: bool,
}

impl Payload for Photo {
    fn prepare(raw: &mut Value) {
        nest_photographer(raw);
    }
}

impl Photo {
    /// Downloads the file bytes of one of this photo's renditions.
    pub async fn download(&self, rendition: &str) -> Result<Vec<u8>, Error> {
        let link = self
            .src
            .get(rendition)
            .ok_or_else(|| Error::UnknownRendition(rendition.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let resp = client.get(link.as_str()).send().await.map_err(|e| {
            tracing::error!("Failed to download {}: {}", link, e);
            e
        })?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let snippet = truncate_body(&resp.text().await?);
            tracing::error!("Download failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}
