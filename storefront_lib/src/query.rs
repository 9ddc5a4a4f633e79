//! Query options and outcomes.

use std::time::Duration;

use storefront_api::types::Envelope;

/// Caller-tunable behavior for one query dispatch.
#[derive(Clone, Debug)]
pub struct QueryOptions {
    /// When false, the dispatch returns [`QueryStatus::Disabled`] without
    /// touching the network or the cache. Evaluated afresh on every call, so
    /// callers recompute it from their current inputs.
    pub enabled: bool,
    /// How long a committed entry counts as fresh. Zero means every dispatch
    /// refetches.
    pub stale_time: Duration,
    /// Number of re-attempts after a retryable failure (429, 5xx, transport
    /// errors). Zero disables retry; this layer adds no policy of its own.
    pub retry: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_time: Duration::ZERO,
            retry: 0,
        }
    }
}

impl QueryOptions {
    /// Sets whether the query is issued at all.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets how long cached results count as fresh.
    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    /// Sets the number of re-attempts after retryable failures.
    pub fn retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }
}

/// How a query dispatch concluded.
#[must_use]
pub enum QueryStatus<T> {
    /// The query was suppressed by `enabled == false`; nothing was issued.
    Disabled,
    /// Served from the cache without a network call.
    Cached(Envelope<T>),
    /// Fetched from the network. Committed to the cache unless the key was
    /// cancelled while the request was in flight.
    Fetched(Envelope<T>),
}

impl<T> QueryStatus<T> {
    /// The envelope, unless the query was disabled.
    pub fn into_envelope(self) -> Option<Envelope<T>> {
        match self {
            QueryStatus::Disabled => None,
            QueryStatus::Cached(envelope) | QueryStatus::Fetched(envelope) => Some(envelope),
        }
    }

    /// Whether the dispatch was suppressed.
    pub fn is_disabled(&self) -> bool {
        matches!(self, QueryStatus::Disabled)
    }

    /// Whether the result came from the cache.
    pub fn was_cached(&self) -> bool {
        matches!(self, QueryStatus::Cached(_))
    }
}
