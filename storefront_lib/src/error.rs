//! Error type for the caching and dispatch layer.

/// Errors produced by the dispatch layer, wrapping transport errors and
/// adding cache, serialization, and input validation failures.
#[derive(thiserror::Error, Debug)]
pub enum StorefrontError {
    /// An error from the underlying transport, propagated unchanged.
    #[error("API error: {0}")]
    Api(#[from] storefront_api::Error),
    /// A cache operation failed (e.g. deserialization of cached data).
    #[error("Cache error: {0}")]
    Cache(String),
    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Caller-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
