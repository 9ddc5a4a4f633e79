//! Caching dispatch layer for the storefront API.
//!
//! Wraps the `storefront_api` transport crate with an explicit query cache,
//! cached query dispatch, mutation construction with an explicit lifecycle,
//! and a product-management composition example.

pub mod cache;
pub mod catalog;
pub mod client;
pub mod dataset;
pub mod error;
pub mod key;
pub mod mutation;
pub mod query;

pub use storefront_api;
pub use storefront_api::types;
pub use storefront_api::{Endpoint, ListParams, MemoryTokenStore, Method, TokenStore};

pub use cache::{CacheSnapshot, QueryCache};
pub use catalog::ProductCatalog;
pub use client::{ApiClient, CredentialMode};
pub use error::StorefrontError;
pub use key::QueryKey;
pub use mutation::{Mutation, MutationOutcome};
pub use query::{QueryOptions, QueryStatus};
