//! Error types for the API client.

use crate::endpoint::Method;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The verb cannot be bound to a mutation. Raised at construction time,
    /// before any network activity.
    #[error("Unsupported mutation method {0}")]
    UnsupportedMethod(Method),
}
