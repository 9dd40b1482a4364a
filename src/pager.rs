//! Forward-only cursor over the request URLs of a multi-page fetch.

use url::Url;

/// Produces the URL for each page of one logical fetch, in order.
///
/// Single use: the cursor starts at page 1, advances by one page per
/// [`next_url`](PageCursor::next_url) call, and is exhausted once the page
/// counter passes `max_pages`. There is no rewind.
pub(crate) struct PageCursor {
    endpoint: Url,
    query: Option<String>,
    per_page: u32,
    max_pages: u32,
    current_page: u32,
}

impl PageCursor {
    pub(crate) fn new(endpoint: Url, query: Option<&str>, per_page: u32, max_pages: u32) -> Self {
        Self {
            endpoint,
            query: query.map(str::to_string),
            per_page,
            max_pages,
            current_page: 1,
        }
    }

    /// True while at least one page remains to be requested.
    pub(crate) fn has_next(&self) -> bool {
        self.current_page <= self.max_pages
    }

    /// The page number the next [`next_url`](PageCursor::next_url) call will build.
    pub(crate) fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Builds the URL for the current page, then advances past it.
    pub(crate) fn next_url(&mut self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());
        url.query_pairs_mut()
            .append_pair("page", &self.current_page.to_string());
        if let Some(query) = &self.query {
            url.query_pairs_mut().append_pair("query", query.as_str());
        }
        self.current_page += 1;
        url
    }
}
