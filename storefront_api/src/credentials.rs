//! Credential providers for the authenticated transport.

use std::sync::Mutex;

/// Source of the bearer token attached to authenticated requests.
///
/// One provider instance is shared across every concurrent request of a
/// transport. Reads may race with the 401-triggered `clear`; the failure
/// mode is benign, since a request that misses the token simply goes out
/// without a credential and receives its own 401.
pub trait TokenStore: Send + Sync {
    /// Returns the current token, if one is set.
    fn get(&self) -> Option<String>;
    /// Replaces the stored token.
    fn set(&self, token: &str);
    /// Removes the stored token.
    fn clear(&self);
}

/// Process-local token store backed by a mutex.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a token.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
