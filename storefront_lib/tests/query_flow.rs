use std::sync::Arc;
use std::time::Duration;

use storefront_lib::storefront_api::Error as ApiError;
use storefront_lib::types::Product;
use storefront_lib::{
    ApiClient, ListParams, MemoryTokenStore, QueryKey, QueryOptions, QueryStatus, StorefrontError,
    TokenStore,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn products_body() -> String {
    serde_json::json!({
        "data": [
            {"id": "41", "name": "Ball Point Pen", "price": 10.0, "category": "office"},
            {"id": "42", "name": "Stapler", "price": 24.5, "category": "office"},
            {"id": "43", "name": "Desk Lamp", "price": 89.99, "category": "lighting"}
        ],
        "meta": {"total": 3, "page": 1, "limit": 10, "totalPages": 1,
                 "hasNextPage": false, "hasPrevPage": false}
    })
    .to_string()
}

async fn client_for(server: &MockServer) -> Arc<ApiClient> {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("test-token"));
    Arc::new(ApiClient::with_base_url(&server.uri(), store).unwrap())
}

#[tokio::test]
async fn second_query_within_stale_time_serves_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string(products_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let key = QueryKey::root("products");
    let options = QueryOptions::default().stale_time(Duration::from_secs(60));

    let first: QueryStatus<Vec<Product>> =
        client.query_public(&key, "/products", None, &options).await.unwrap();
    assert!(!first.was_cached());

    let second: QueryStatus<Vec<Product>> =
        client.query_public(&key, "/products", None, &options).await.unwrap();
    assert!(second.was_cached());
    assert_eq!(second.into_envelope().unwrap().data.len(), 3);
}

#[tokio::test]
async fn zero_stale_time_refetches_every_dispatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string(products_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let key = QueryKey::root("products");
    let options = QueryOptions::default();

    let first: QueryStatus<Vec<Product>> =
        client.query_public(&key, "/products", None, &options).await.unwrap();
    let second: QueryStatus<Vec<Product>> =
        client.query_public(&key, "/products", None, &options).await.unwrap();
    assert!(!first.was_cached());
    assert!(!second.was_cached());
}

#[tokio::test]
async fn disabled_query_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string(products_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let key = QueryKey::root("products").with_param("search", "p");
    let options = QueryOptions::default().enabled(false);

    let status: QueryStatus<Vec<Product>> =
        client.query_public(&key, "/products", None, &options).await.unwrap();
    assert!(status.is_disabled());
    assert!(client.cache().lookup(&key).is_none());
}

#[tokio::test]
async fn invalidated_entry_forces_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string(products_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let key = QueryKey::root("products");
    let options = QueryOptions::default().stale_time(Duration::from_secs(60));

    let _: QueryStatus<Vec<Product>> =
        client.query_public(&key, "/products", None, &options).await.unwrap();
    client.cache().invalidate_prefix(&key);

    let refetched: QueryStatus<Vec<Product>> =
        client.query_public(&key, "/products", None, &options).await.unwrap();
    assert!(!refetched.was_cached());
}

#[tokio::test]
async fn retry_passthrough_recovers_from_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("flaky"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string(products_body()))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let key = QueryKey::root("products");
    let options = QueryOptions::default().retry(2);

    let status: QueryStatus<Vec<Product>> =
        client.query_public(&key, "/products", None, &options).await.unwrap();
    assert_eq!(status.into_envelope().unwrap().data.len(), 3);
}

#[tokio::test]
async fn client_error_propagates_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such product"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let key = QueryKey::root("product").with_segment("missing");

    let result: Result<QueryStatus<Product>, _> = client
        .query_public(&key, "/products/missing", None, &QueryOptions::default().retry(3))
        .await;
    match result {
        Err(StorefrontError::Api(ApiError::HttpStatus { status, body })) => {
            assert_eq!(status, 404);
            assert!(body.contains("no such product"));
        }
        _ => panic!("expected a 404 HttpStatus error"),
    }
}

#[tokio::test]
async fn distinct_keys_are_distinct_cache_identities() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(products_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(products_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = QueryOptions::default().stale_time(Duration::from_secs(60));

    for page in [1i64, 2] {
        let key = QueryKey::root("products").with_param("page", page);
        let params = ListParams::default().with_page(page);
        let status: QueryStatus<Vec<Product>> = client
            .query_public(&key, "/products", Some(&params), &options)
            .await
            .unwrap();
        assert!(!status.was_cached());
    }

    // Both pages are now cached under their own keys.
    for page in [1i64, 2] {
        let key = QueryKey::root("products").with_param("page", page);
        let params = ListParams::default().with_page(page);
        let status: QueryStatus<Vec<Product>> = client
            .query_public(&key, "/products", Some(&params), &options)
            .await
            .unwrap();
        assert!(status.was_cached());
    }
}

#[tokio::test]
async fn authenticated_query_attaches_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/user-123"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            serde_json::json!({
                "data": {"id": "user-123", "name": "Jane Smith",
                         "email": "jane.smith@example.com", "role": "admin"}
            })
            .to_string(),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let key = QueryKey::root("user").with_segment("user-123");
    let status: QueryStatus<storefront_lib::types::User> = client
        .query_authenticated(&key, "/users/user-123", None, &QueryOptions::default())
        .await
        .unwrap();
    assert_eq!(status.into_envelope().unwrap().data.name, "Jane Smith");
}
