//! Rate-limit bookkeeping derived from API response headers.
//!
//! The API reports `X-Ratelimit-Remaining` on every successful response, and
//! the `X-Ratelimit-Limit` / `X-Ratelimit-Reset` pair only on some of them.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const LIMIT_HEADER: &str = "x-ratelimit-limit";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Atomic record of the most recently observed rate-limit headers.
///
/// Written only after 200 responses. Zero doubles as the "never seen"
/// sentinel for the limit and reset fields, which [`snapshot`](RateLimitTracker::snapshot)
/// maps to `None`.
pub(crate) struct RateLimitTracker {
    limit: AtomicU64,
    remaining: AtomicU64,
    reset_epoch: AtomicI64,
}

impl RateLimitTracker {
    pub(crate) fn new() -> Self {
        Self {
            limit: AtomicU64::new(0),
            remaining: AtomicU64::new(0),
            reset_epoch: AtomicI64::new(0),
        }
    }

    /// Records the rate-limit headers of one successful response.
    ///
    /// `remaining` updates whenever its header parses. `limit` only updates
    /// alongside a parsable reset header, since the API sends that pair
    /// intermittently. Malformed values are treated as absent.
    pub(crate) fn record(&self, headers: &HeaderMap) {
        if let Some(remaining) = header_value(headers, REMAINING_HEADER) {
            self.remaining.store(remaining, Ordering::Relaxed);
        }
        if let Some(reset) = header_value::<i64>(headers, RESET_HEADER) {
            self.reset_epoch.store(reset, Ordering::Relaxed);
            if let Some(limit) = header_value(headers, LIMIT_HEADER) {
                self.limit.store(limit, Ordering::Relaxed);
            }
        }
    }

    /// Snapshot the current state.
    pub(crate) fn snapshot(&self) -> RateLimit {
        let limit = self.limit.load(Ordering::Relaxed);
        let reset_epoch = self.reset_epoch.load(Ordering::Relaxed);
        RateLimit {
            limit: (limit != 0).then_some(limit),
            remaining: self.remaining.load(Ordering::Relaxed),
            reset_epoch: (reset_epoch != 0).then_some(reset_epoch),
        }
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Point-in-time view of the API quota as last reported by the server.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// Total request quota for the current period, once the server has reported one.
    pub limit: Option<u64>,
    /// Requests left in the current period. Reads 0 until first observed.
    pub remaining: u64,
    /// UNIX timestamp at which the quota resets, once the server has reported one.
    pub reset_epoch: Option<i64>,
}

impl RateLimit {
    /// The reset time as a UTC timestamp, when the server has reported one.
    pub fn resets_at(&self) -> Option<DateTime<Utc>> {
        self.reset_epoch.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderName};

    use super::RateLimitTracker;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                value.parse().unwrap(),
            );
        }
        map
    }

    #[test]
    fn starts_unknown() {
        let tracker = RateLimitTracker::new();
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.limit, None);
        assert_eq!(snapshot.remaining, 0);
        assert_eq!(snapshot.reset_epoch, None);
        assert!(snapshot.resets_at().is_none());
    }

    #[test]
    fn remaining_updates_alone() {
        let tracker = RateLimitTracker::new();
        tracker.record(&headers(&[("x-ratelimit-remaining", "19999")]));

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.remaining, 19999);
        assert_eq!(snapshot.limit, None);
        assert_eq!(snapshot.reset_epoch, None);
    }

    #[test]
    fn limit_and_reset_update_together() {
        let tracker = RateLimitTracker::new();
        tracker.record(&headers(&[
            ("x-ratelimit-limit", "20000"),
            ("x-ratelimit-remaining", "19999"),
            ("x-ratelimit-reset", "1724328000"),
        ]));

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.limit, Some(20000));
        assert_eq!(snapshot.remaining, 19999);
        assert_eq!(snapshot.reset_epoch, Some(1724328000));
        assert_eq!(
            snapshot.resets_at().unwrap().to_rfc3339(),
            "2024-08-22T12:00:00+00:00"
        );
    }

    #[test]
    fn remaining_only_response_retains_limit_and_reset() {
        let tracker = RateLimitTracker::new();
        tracker.record(&headers(&[
            ("x-ratelimit-limit", "20000"),
            ("x-ratelimit-remaining", "19999"),
            ("x-ratelimit-reset", "1724328000"),
        ]));
        tracker.record(&headers(&[("x-ratelimit-remaining", "19998")]));

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.remaining, 19998);
        assert_eq!(snapshot.limit, Some(20000));
        assert_eq!(snapshot.reset_epoch, Some(1724328000));
    }

    #[test]
    fn limit_without_reset_is_ignored() {
        let tracker = RateLimitTracker::new();
        tracker.record(&headers(&[
            ("x-ratelimit-limit", "20000"),
            ("x-ratelimit-remaining", "19999"),
        ]));

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.remaining, 19999);
        assert_eq!(snapshot.limit, None);
        assert_eq!(snapshot.reset_epoch, None);
    }

    #[test]
    fn malformed_values_are_treated_as_absent() {
        let tracker = RateLimitTracker::new();
        tracker.record(&headers(&[
            ("x-ratelimit-limit", "20000"),
            ("x-ratelimit-remaining", "19999"),
            ("x-ratelimit-reset", "1724328000"),
        ]));
        tracker.record(&headers(&[
            ("x-ratelimit-limit", "plenty"),
            ("x-ratelimit-remaining", "soon"),
            ("x-ratelimit-reset", "1724329000"),
        ]));

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.remaining, 19999);
        assert_eq!(snapshot.limit, Some(20000));
        assert_eq!(snapshot.reset_epoch, Some(1724329000));
    }

    #[test]
    fn empty_headers_change_nothing() {
        let tracker = RateLimitTracker::new();
        tracker.record(&headers(&[
            ("x-ratelimit-limit", "20000"),
            ("x-ratelimit-remaining", "19999"),
            ("x-ratelimit-reset", "1724328000"),
        ]));
        tracker.record(&HeaderMap::new());

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.remaining, 19999);
        assert_eq!(snapshot.limit, Some(20000));
        assert_eq!(snapshot.reset_epoch, Some(1724328000));
    }
}
