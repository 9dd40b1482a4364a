//! Paced, authenticated page-fetch engine shared by the photo and video clients.

use std::time::Duration;

use tokio::time::sleep;
use url::Url;

use crate::cancel::CancelToken;
use crate::normalize::Payload;
use crate::pager::PageCursor;
use crate::rate_limit::{RateLimit, RateLimitTracker};
use crate::Error;

/// Transport timeout applied to each request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Delay between consecutive page requests, to stay under the API rate limit.
const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Drives one endpoint family: sequences page requests through a
/// [`PageCursor`], attaches the auth token, requires HTTP 200, records
/// rate-limit headers, and paces consecutive requests.
///
/// Generic over the response type per call, so the photo and video clients
/// share the same engine.
pub(crate) struct Downloader {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    max_pages: u32,
    per_page: u32,
    timeout: Duration,
    pacing: Duration,
    rate_limit: RateLimitTracker,
    cancel: Option<CancelToken>,
}

impl Downloader {
    /// Creates an engine rooted at `base_url`. Fails if the URL is not an
    /// absolute http(s) URL; nothing else about the configuration can fail
    /// later on.
    pub(crate) fn new(
        base_url: &str,
        token: &str,
        max_pages: u32,
        per_page: u32,
    ) -> Result<Self, Error> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url,
            token: token.to_string(),
            max_pages,
            per_page,
            timeout: DEFAULT_TIMEOUT,
            pacing: DEFAULT_PACING,
            rate_limit: RateLimitTracker::new(),
            cancel: None,
        })
    }

    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub(crate) fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The rate-limit state most recently reported by the API.
    pub(crate) fn rate_limit(&self) -> RateLimit {
        self.rate_limit.snapshot()
    }

    /// Fetches `max_pages` pages from `endpoint`, in page order.
    ///
    /// All-or-nothing: the first failing page aborts the whole fetch and
    /// already-fetched pages are dropped. No request is issued for the pages
    /// after the failing one.
    pub(crate) async fn fetch_pages<T: Payload>(
        &self,
        endpoint: &str,
        query: Option<&str>,
    ) -> Result<Vec<T>, Error> {
        let mut cursor = PageCursor::new(
            self.endpoint_url(endpoint),
            query,
            self.per_page,
            self.max_pages,
        );
        let mut pages = Vec::with_capacity(self.max_pages as usize);

        while cursor.has_next() {
            self.check_cancelled()?;
            let page = cursor.current_page();
            let url = cursor.next_url();
            tracing::debug!("Requesting page {} of {}: {}", page, self.max_pages, url);

            let body = self.get_body(url).await?;
            pages.push(T::from_json(&body)?);

            if cursor.has_next() {
                self.pace().await?;
            }
        }

        Ok(pages)
    }

    /// Fetches a single item at `endpoint/{id}`. No pagination parameters
    /// and no pacing delay.
    pub(crate) async fn fetch_by_id<T: Payload>(
        &self,
        endpoint: &str,
        id: u64,
    ) -> Result<T, Error> {
        self.check_cancelled()?;
        let url = self.item_url(endpoint, id);
        tracing::debug!("Requesting {}", url);

        let body = self.get_body(url).await?;
        T::from_json(&body)
    }

    /// Issues one authenticated GET and returns the body of a 200 response.
    ///
    /// Rate-limit headers are recorded before the body is read, and only for
    /// 200 responses.
    async fn get_body(&self, url: Url) -> Result<String, Error> {
        let request = self
            .http
            .get(url)
            .header("Authorization", &self.token)
            .timeout(self.timeout);

        let resp = match &self.cancel {
            Some(token) => {
                tokio::select! {
                    resp = request.send() => resp,
                    _ = token.cancelled() => return Err(Error::Cancelled),
                }
            }
            None => request.send().await,
        };
        let resp = resp.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            e
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::OK {
            self.rate_limit.record(resp.headers());
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            e
        })?;

        if status != reqwest::StatusCode::OK {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    /// Waits out the pacing interval, aborting early if the token fires.
    async fn pace(&self) -> Result<(), Error> {
        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    _ = sleep(self.pacing) => Ok(()),
                    _ = token.cancelled() => Err(Error::Cancelled),
                }
            }
            None => {
                sleep(self.pacing).await;
                Ok(())
            }
        }
    }

    fn check_cancelled(&self) -> Result<(), Error> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, so this cannot fail.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(endpoint);
        }
        url
    }

    fn item_url(&self, endpoint: &str, id: u64) -> Url {
        let mut url = self.endpoint_url(endpoint);
        if let Ok(mut path) = url.path_segments_mut() {
            path.push(&id.to_string());
        }
        url
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, Error> {
    let url = Url::parse(base_url).map_err(|e| {
        tracing::error!("Invalid base URL {}: {}", base_url, e);
        Error::InvalidBaseUrl(base_url.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        tracing::error!("Invalid base URL {}: expected an absolute http(s) URL", base_url);
        return Err(Error::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(url)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
