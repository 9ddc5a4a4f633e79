//! HTTP transport for the storefront API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    credentials::TokenStore, endpoint::Method, params::ListParams, types::Envelope, Error,
};

/// API base URL used when [`BASE_URL_ENV`] is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.example.com";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "STOREFRONT_API_URL";

/// Per-request timeout shared by both transport variants.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves the API base URL from the environment, falling back to the
/// default literal.
pub fn base_url_from_env() -> String {
    std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// HTTP client bound to a base URL and a credential policy.
///
/// The public variant never attaches credentials, even when a token exists
/// somewhere in the process. The authenticated variant asks its injected
/// [`TokenStore`] on every request and attaches `Authorization: Bearer
/// <token>` iff one is present; an absent token is not an error. Both
/// variants clear the store on a 401 response, which is a no-op for the
/// public variant since it carries no store.
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Arc<dyn TokenStore>>,
}

impl Transport {
    /// Creates a public transport against the configured base URL.
    pub fn public() -> Result<Self, Error> {
        Self::build(base_url_from_env(), None)
    }

    /// Creates an authenticated transport against the configured base URL.
    pub fn authenticated(store: Arc<dyn TokenStore>) -> Result<Self, Error> {
        Self::build(base_url_from_env(), Some(store))
    }

    /// Public transport with a custom base URL. Used for testing with wiremock.
    pub fn public_with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::build(base_url.to_string(), None)
    }

    /// Authenticated transport with a custom base URL. Used for testing.
    pub fn authenticated_with_base_url(
        base_url: &str,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, Error> {
        Self::build(base_url.to_string(), Some(store))
    }

    fn build(base_url: String, credentials: Option<Arc<dyn TokenStore>>) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Whether this transport attaches credentials to requests.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    fn request_url(&self, path: &str, params: Option<&ListParams>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match params {
            Some(params) => params.add_to_url(&url),
            None => url,
        })
    }

    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        params: Option<&ListParams>,
        body: Option<&B>,
    ) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.request_url(path, params)?;
        let mut req = match method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
            Method::Patch => self.http.patch(url),
            Method::Delete => self.http.delete(url),
        };
        if let Some(store) = &self.credentials {
            if let Some(token) = store.get() {
                req = req.header(AUTHORIZATION, format!("Bearer {}", token));
            }
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!("{} {} failed to send: {}", method, path, e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            if let Some(store) = &self.credentials {
                store.clear();
            }
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("{} {} failed with status {}: {}", method, path, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<Envelope<T>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse response: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Issues a GET and returns the parsed envelope.
    pub async fn get<T>(
        &self,
        path: &str,
        params: Option<&ListParams>,
    ) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
    {
        self.send::<T, ()>(Method::Get, path, params, None).await
    }

    /// Issues a POST with `body` as the JSON payload.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::Post, path, None, Some(body)).await
    }

    /// Issues a PUT with `body` as the JSON payload.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::Put, path, None, Some(body)).await
    }

    /// Issues a PATCH with `body` as the JSON payload.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::Patch, path, None, Some(body)).await
    }

    /// Issues a DELETE. The variables travel in the request body rather than
    /// the query string.
    pub async fn delete<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::Delete, path, None, Some(body)).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
