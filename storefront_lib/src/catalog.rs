//! Product-management composition over the query and mutation layers.
//!
//! Mirrors how an application screen wires the pieces together: keyed
//! product queries with search and pagination, cache reconciliation after
//! writes, and an optimistic delete with rollback. Illustrative glue rather
//! than reusable infrastructure.

use std::sync::Arc;
use std::time::Duration;

use storefront_api::types::{
    DeleteReceipt, DeleteRequest, Envelope, NewProduct, Product, ProductUpdate, User,
};
use storefront_api::{Endpoint, ListParams};

use crate::client::ApiClient;
use crate::error::StorefrontError;
use crate::key::QueryKey;
use crate::mutation::MutationOutcome;
use crate::query::{QueryOptions, QueryStatus};

/// How long product reads stay fresh before a refetch.
const PRODUCT_STALE_TIME: Duration = Duration::from_secs(300);

/// Minimum search text length before a search request is issued.
const MIN_SEARCH_LEN: usize = 2;

pub struct ProductCatalog {
    client: Arc<ApiClient>,
}

impl ProductCatalog {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Key under which the unfiltered product list is cached. Mutations
    /// invalidate and cancel by this prefix, so search and page variants are
    /// covered too.
    pub fn products_key() -> QueryKey {
        QueryKey::root("products")
    }

    fn search_key(search: &str, page: i64) -> QueryKey {
        Self::products_key()
            .with_param("search", search)
            .with_param("page", page)
    }

    fn detail_key(id: &str) -> QueryKey {
        QueryKey::root("product").with_segment(id)
    }

    /// Fetches the unfiltered product list through the public transport.
    pub async fn list_products(&self) -> Result<QueryStatus<Vec<Product>>, StorefrontError> {
        self.client
            .query_public(
                &Self::products_key(),
                "/products",
                None,
                &QueryOptions::default().stale_time(PRODUCT_STALE_TIME),
            )
            .await
    }

    /// Searches products. Disabled until the search text reaches two
    /// characters, so keystroke-by-keystroke callers don't flood the API.
    pub async fn search_products(
        &self,
        search: &str,
        page: i64,
        limit: i64,
    ) -> Result<QueryStatus<Vec<Product>>, StorefrontError> {
        let params = ListParams::default()
            .with_page(page)
            .with_limit(limit)
            .with_search(search);
        let options = QueryOptions::default()
            .enabled(search.chars().count() >= MIN_SEARCH_LEN)
            .stale_time(PRODUCT_STALE_TIME);
        self.client
            .query_public(&Self::search_key(search, page), "/products", Some(&params), &options)
            .await
    }

    /// Fetches one product's detail. Disabled while no id is selected.
    pub async fn product_detail(
        &self,
        id: Option<&str>,
    ) -> Result<QueryStatus<Product>, StorefrontError> {
        let options = QueryOptions::default()
            .enabled(id.is_some())
            .stale_time(PRODUCT_STALE_TIME);
        let id = id.unwrap_or_default();
        self.client
            .query_public(&Self::detail_key(id), &format!("/products/{}", id), None, &options)
            .await
    }

    /// Fetches a user's profile through the authenticated transport.
    pub async fn user_profile(&self, user_id: &str) -> Result<QueryStatus<User>, StorefrontError> {
        self.client
            .query_authenticated(
                &QueryKey::root("user").with_segment(user_id),
                &format!("/users/{}", user_id),
                None,
                &QueryOptions::default(),
            )
            .await
    }

    /// Creates a product through the public transport, then invalidates the
    /// product listings so the next read refetches.
    pub async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<Envelope<Product>, StorefrontError> {
        let mutation = self
            .client
            .public_post::<NewProduct, Product>(Endpoint::fixed("/products"));
        let envelope = mutation.dispatch(product).await?;
        self.client.cache().invalidate_prefix(&Self::products_key());
        Ok(envelope)
    }

    /// Updates a product through the authenticated transport, writes the
    /// fresh detail into the cache, and invalidates the listings.
    pub async fn update_product(
        &self,
        update: &ProductUpdate,
    ) -> Result<Envelope<Product>, StorefrontError> {
        let mutation = self.client.authenticated_put::<ProductUpdate, Product>(
            Endpoint::derived(|update: &ProductUpdate| format!("/products/{}", update.id)),
        );
        let envelope = mutation.dispatch(update).await?;
        if let Err(e) = self.client.cache().write_as(&Self::detail_key(&update.id), &envelope) {
            tracing::warn!("failed to reconcile product detail cache: {}", e);
        }
        self.client.cache().invalidate_prefix(&Self::products_key());
        Ok(envelope)
    }

    /// Deletes a product optimistically.
    ///
    /// Cancels in-flight product queries so a stale response cannot clobber
    /// the local edit, removes the item from the cached list before
    /// dispatching, restores the previous list if the delete fails, and
    /// invalidates the listings on either outcome.
    pub async fn delete_product(
        &self,
        id: &str,
    ) -> Result<Envelope<DeleteReceipt>, StorefrontError> {
        let cache = self.client.cache();
        let list_key = Self::products_key();

        cache.cancel_prefix(&list_key);
        let previous: Option<Envelope<Vec<Product>>> = cache.get_as(&list_key)?;
        if let Some(previous) = &previous {
            let mut trimmed = previous.clone();
            trimmed.data.retain(|p| p.id != id);
            if let Err(e) = cache.write_as(&list_key, &trimmed) {
                tracing::warn!("failed to apply optimistic removal: {}", e);
            }
        }

        let mutation = self.client.authenticated_delete::<DeleteRequest, DeleteReceipt>(
            Endpoint::derived(|req: &DeleteRequest| format!("/products/{}", req.id)),
        );
        let request = DeleteRequest { id: id.to_string() };
        let outcome = mutation.dispatch_with(&request, |_| previous).await;

        let result = match outcome {
            MutationOutcome::Completed { envelope, .. } => Ok(envelope),
            MutationOutcome::Failed { error, context } => {
                if let Some(previous) = context {
                    if let Err(e) = cache.write_as(&list_key, &previous) {
                        tracing::warn!("failed to restore product list after delete error: {}", e);
                    }
                }
                Err(error)
            }
        };
        cache.invalidate_prefix(&list_key);
        result
    }
}
