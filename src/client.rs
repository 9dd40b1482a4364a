//! Typed clients for the photo and video endpoint families.

use std::time::Duration;

use crate::cancel::CancelToken;
use crate::downloader::Downloader;
use crate::rate_limit::RateLimit;
use crate::types::{Photo, PhotoPage, Video, VideoPage};
use crate::Error;

/// Production base URL for the photo endpoints.
const PHOTOS_BASE_URL: &str = "https://api.pexels.com/v1/";
/// Production base URL for the video endpoints.
const VIDEOS_BASE_URL: &str = "https://api.pexels.com/videos/";

const SEARCH_ENDPOINT: &str = "search";
const CURATED_ENDPOINT: &str = "curated";
const POPULAR_ENDPOINT: &str = "popular";
const PHOTOS_ENDPOINT: &str = "photos";
const VIDEOS_ENDPOINT: &str = "videos";

/// Client for the photo endpoints.
///
/// Every multi-page method fetches up to `max_pages` pages of `per_page`
/// results each, pacing consecutive requests to stay under the API rate
/// limit.
pub struct PhotoClient {
    inner: Downloader,
}

impl PhotoClient {
    /// Creates a client for the production photo API.
    pub fn new(token: &str, max_pages: u32, per_page: u32) -> Result<Self, Error> {
        Self::with_base_url(PHOTOS_BASE_URL, token, max_pages, per_page)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(
        base_url: &str,
        token: &str,
        max_pages: u32,
        per_page: u32,
    ) -> Result<Self, Error> {
        Ok(Self {
            inner: Downloader::new(base_url, token, max_pages, per_page)?,
        })
    }

    /// Sets the per-request transport timeout (default 30 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.with_timeout(timeout);
        self
    }

    /// Sets the delay between consecutive page requests (default 1 second).
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.inner = self.inner.with_pacing(pacing);
        self
    }

    /// Attaches a cancellation token, observed before, during, and between
    /// requests. A cancelled fetch fails with [`Error::Cancelled`].
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.inner = self.inner.with_cancel_token(cancel);
        self
    }

    /// Fetches up to `max_pages` pages of photos matching `query`.
    pub async fn search(&self, query: &str) -> Result<Vec<PhotoPage>, Error> {
        self.inner.fetch_pages(SEARCH_ENDPOINT, Some(query)).await
    }

    /// Fetches up to `max_pages` pages of curated photos.
    pub async fn curated(&self) -> Result<Vec<PhotoPage>, Error> {
        self.inner.fetch_pages(CURATED_ENDPOINT, None).await
    }

    /// Fetches a single photo by its numeric ID.
    pub async fn get_photo(&self, id: u64) -> Result<Photo, Error> {
        self.inner.fetch_by_id(PHOTOS_ENDPOINT, id).await
    }

    /// The rate-limit state most recently reported by the API.
    pub fn rate_limit(&self) -> RateLimit {
        self.inner.rate_limit()
    }
}

/// Client for the video endpoints.
///
/// Same engine and configuration surface as [`PhotoClient`]; only the base
/// URL, endpoint names, and response types differ.
pub struct VideoClient {
    inner: Downloader,
}

impl VideoClient {
    /// Creates a client for the production video API.
    pub fn new(token: &str, max_pages: u32, per_page: u32) -> Result<Self, Error> {
        Self::with_base_url(VIDEOS_BASE_URL, token, max_pages, per_page)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(
        base_url: &str,
        token: &str,
        max_pages: u32,
        per_page: u32,
    ) -> Result<Self, Error> {
        Ok(Self {
            inner: Downloader::new(base_url, token, max_pages, per_page)?,
        })
    }

    /// Sets the per-request transport timeout (default 30 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.with_timeout(timeout);
        self
    }

    /// Sets the delay between consecutive page requests (default 1 second).
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.inner = self.inner.with_pacing(pacing);
        self
    }

    /// Attaches a cancellation token, observed before, during, and between
    /// requests. A cancelled fetch fails with [`Error::Cancelled`].
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.inner = self.inner.with_cancel_token(cancel);
        self
    }

    /// Fetches up to `max_pages` pages of videos matching `query`.
    pub async fn search(&self, query: &str) -> Result<Vec<VideoPage>, Error> {
        self.inner.fetch_pages(SEARCH_ENDPOINT, Some(query)).await
    }

    /// Fetches up to `max_pages` pages of popular videos.
    pub async fn popular(&self) -> Result<Vec<VideoPage>, Error> {
        self.inner.fetch_pages(POPULAR_ENDPOINT, None).await
    }

    /// Fetches a single video by its numeric ID.
    pub async fn get_video(&self, id: u64) -> Result<Video, Error> {
        self.inner.fetch_by_id(VIDEOS_ENDPOINT, id).await
    }

    /// The rate-limit state most recently reported by the API.
    pub fn rate_limit(&self) -> RateLimit {
        self.inner.rate_limit()
    }
}
