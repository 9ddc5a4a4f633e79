//! Dual-transport client with query caching.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use storefront_api::types::Envelope;
use storefront_api::{
    Endpoint, Error as ApiError, ListParams, MemoryTokenStore, Method, TokenStore, Transport,
};

use crate::cache::QueryCache;
use crate::error::StorefrontError;
use crate::key::QueryKey;
use crate::mutation::Mutation;
use crate::query::{QueryOptions, QueryStatus};

/// Credential mode selecting which transport a dispatch goes through.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CredentialMode {
    Public,
    Authenticated,
}

const RETRY_BASE_DELAY_MS: u64 = 500;
const RETRY_MAX_DELAY_MS: u64 = 10_000;

fn delay_for_attempt(attempt: u32) -> Duration {
    let shift = attempt.saturating_sub(1).min(30);
    let exp = 1u64 << shift;
    let base = RETRY_BASE_DELAY_MS.saturating_mul(exp).min(RETRY_MAX_DELAY_MS);
    let jitter = rand::thread_rng().gen_range(0.8..1.2);
    Duration::from_millis((base as f64 * jitter) as u64)
}

fn is_retryable(err: &ApiError) -> bool {
    match err {
        ApiError::RequestFailed => true,
        ApiError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        ApiError::UnsupportedMethod(_) => false,
    }
}

/// Client combining the public and authenticated transports with one shared
/// query cache.
///
/// Reads go through [`ApiClient::query_public`] /
/// [`ApiClient::query_authenticated`]; writes are constructed with the
/// verb- and mode-specific mutation helpers, or with [`ApiClient::mutation`]
/// when the verb is chosen at runtime.
pub struct ApiClient {
    public: Arc<Transport>,
    authenticated: Arc<Transport>,
    cache: Arc<QueryCache>,
}

impl ApiClient {
    /// Creates a client against the configured base URL with the given
    /// credential provider on the authenticated transport.
    pub fn new(store: Arc<dyn TokenStore>) -> Result<Self, StorefrontError> {
        Ok(Self {
            public: Arc::new(Transport::public()?),
            authenticated: Arc::new(Transport::authenticated(store)?),
            cache: Arc::new(QueryCache::new()),
        })
    }

    /// Creates a client with an empty in-memory credential provider.
    pub fn without_credentials() -> Result<Self, StorefrontError> {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, store: Arc<dyn TokenStore>) -> Result<Self, StorefrontError> {
        Ok(Self {
            public: Arc::new(Transport::public_with_base_url(base_url)?),
            authenticated: Arc::new(Transport::authenticated_with_base_url(base_url, store)?),
            cache: Arc::new(QueryCache::new()),
        })
    }

    /// The query cache shared by this client's dispatches.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn transport(&self, mode: CredentialMode) -> &Arc<Transport> {
        match mode {
            CredentialMode::Public => &self.public,
            CredentialMode::Authenticated => &self.authenticated,
        }
    }

    /// GET through the public transport. See [`ApiClient::query`].
    pub async fn query_public<T>(
        &self,
        key: &QueryKey,
        endpoint: &str,
        params: Option<&ListParams>,
        options: &QueryOptions,
    ) -> Result<QueryStatus<T>, StorefrontError>
    where
        T: DeserializeOwned + Serialize,
    {
        self.query(CredentialMode::Public, key, endpoint, params, options)
            .await
    }

    /// GET through the authenticated transport. See [`ApiClient::query`].
    pub async fn query_authenticated<T>(
        &self,
        key: &QueryKey,
        endpoint: &str,
        params: Option<&ListParams>,
        options: &QueryOptions,
    ) -> Result<QueryStatus<T>, StorefrontError>
    where
        T: DeserializeOwned + Serialize,
    {
        self.query(CredentialMode::Authenticated, key, endpoint, params, options)
            .await
    }

    /// Cached GET dispatch.
    ///
    /// Serves from the cache while the entry under `key` is fresh; otherwise
    /// issues one GET (plus up to `options.retry` re-attempts on retryable
    /// failures) and commits the result, unless the key was cancelled while
    /// the request was in flight. The key must encode every variable that
    /// affects the response; nothing else participates in deduplication.
    pub async fn query<T>(
        &self,
        mode: CredentialMode,
        key: &QueryKey,
        endpoint: &str,
        params: Option<&ListParams>,
        options: &QueryOptions,
    ) -> Result<QueryStatus<T>, StorefrontError>
    where
        T: DeserializeOwned + Serialize,
    {
        if !options.enabled {
            return Ok(QueryStatus::Disabled);
        }

        if let Some(snapshot) = self.cache.lookup(key) {
            if !snapshot.stale && snapshot.age < options.stale_time {
                let envelope: Envelope<T> = serde_json::from_str(&snapshot.value)?;
                return Ok(QueryStatus::Cached(envelope));
            }
        }

        let epoch = self.cache.begin(key);
        let transport = self.transport(mode);
        let mut attempt: u32 = 0;
        let envelope: Envelope<T> = loop {
            match transport.get::<T>(endpoint, params).await {
                Ok(envelope) => break envelope,
                Err(err) => {
                    attempt += 1;
                    if attempt > options.retry || !is_retryable(&err) {
                        self.cache.abort(key, epoch);
                        return Err(err.into());
                    }
                    let delay = delay_for_attempt(attempt);
                    tracing::warn!(
                        "query {} failed (attempt {}/{}), retrying in {:.1}s",
                        key,
                        attempt,
                        options.retry,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        };

        match serde_json::to_string(&envelope) {
            Ok(json) => {
                if !self.cache.commit(key, epoch, json) {
                    tracing::debug!("query {} was cancelled in flight; result not cached", key);
                }
            }
            Err(e) => tracing::warn!("failed to serialize {} for caching: {}", key, e),
        }
        Ok(QueryStatus::Fetched(envelope))
    }

    /// Constructs a mutation with the verb and credential mode chosen at
    /// runtime. Rejects non-mutation verbs synchronously, before any network
    /// activity.
    pub fn mutation<V, T>(
        &self,
        method: Method,
        mode: CredentialMode,
        endpoint: Endpoint<V>,
    ) -> Result<Mutation<V, T>, StorefrontError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        if !method.is_mutation() {
            return Err(StorefrontError::Api(ApiError::UnsupportedMethod(method)));
        }
        Ok(Mutation::bind(method, endpoint, Arc::clone(self.transport(mode))))
    }

    /// POST through the public transport.
    pub fn public_post<V: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint<V>) -> Mutation<V, T> {
        Mutation::bind(Method::Post, endpoint, Arc::clone(&self.public))
    }

    /// PUT through the public transport.
    pub fn public_put<V: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint<V>) -> Mutation<V, T> {
        Mutation::bind(Method::Put, endpoint, Arc::clone(&self.public))
    }

    /// PATCH through the public transport.
    pub fn public_patch<V: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint<V>) -> Mutation<V, T> {
        Mutation::bind(Method::Patch, endpoint, Arc::clone(&self.public))
    }

    /// DELETE through the public transport.
    pub fn public_delete<V: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint<V>) -> Mutation<V, T> {
        Mutation::bind(Method::Delete, endpoint, Arc::clone(&self.public))
    }

    /// POST through the authenticated transport.
    pub fn authenticated_post<V: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint<V>) -> Mutation<V, T> {
        Mutation::bind(Method::Post, endpoint, Arc::clone(&self.authenticated))
    }

    /// PUT through the authenticated transport.
    pub fn authenticated_put<V: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint<V>) -> Mutation<V, T> {
        Mutation::bind(Method::Put, endpoint, Arc::clone(&self.authenticated))
    }

    /// PATCH through the authenticated transport.
    pub fn authenticated_patch<V: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint<V>) -> Mutation<V, T> {
        Mutation::bind(Method::Patch, endpoint, Arc::clone(&self.authenticated))
    }

    /// DELETE through the authenticated transport.
    pub fn authenticated_delete<V: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint<V>) -> Mutation<V, T> {
        Mutation::bind(Method::Delete, endpoint, Arc::clone(&self.authenticated))
    }
}
