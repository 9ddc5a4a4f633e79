use std::sync::Arc;

use storefront_api::types::{DeleteReceipt, Product, User};
use storefront_api::{Error, ListParams, MemoryTokenStore, TokenStore, Transport};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

/// Matches only requests carrying no Authorization header.
struct NoAuthorizationHeader;

impl wiremock::Match for NoAuthorizationHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

#[tokio::test]
async fn get_products_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("products.json");

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let transport = Transport::public_with_base_url(&mock_server.uri()).unwrap();
    let resp = transport.get::<Vec<Product>>("/products", None).await.unwrap();
    assert_eq!(resp.data.len(), 3);
    assert_eq!(resp.data[0].name, "Ball Point Pen");
    assert!(resp.meta.unwrap().is_consistent());
}

#[tokio::test]
async fn get_sends_list_params() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("products.json");

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("search", "pen"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let transport = Transport::public_with_base_url(&mock_server.uri()).unwrap();
    let params = ListParams::default().with_page(2).with_limit(5).with_search("pen");
    let result = transport.get::<Vec<Product>>("/products", Some(&params)).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn server_error_propagates_with_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let transport = Transport::public_with_base_url(&mock_server.uri()).unwrap();
    let result = transport.get::<Vec<Product>>("/products", None).await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal Server Error"));
        }
        other => panic!("expected HttpStatus error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn malformed_json_is_a_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let transport = Transport::public_with_base_url(&mock_server.uri()).unwrap();
    let result = transport.get::<Vec<Product>>("/products", None).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}

#[tokio::test]
async fn authenticated_transport_attaches_bearer_token() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("user.json");

    Mock::given(method("GET"))
        .and(path("/users/user-123"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("test-token"));
    let transport = Transport::authenticated_with_base_url(&mock_server.uri(), store).unwrap();
    let resp = transport.get::<User>("/users/user-123", None).await.unwrap();
    assert_eq!(resp.data.id, "user-123");
}

#[tokio::test]
async fn authenticated_transport_without_token_sends_no_header() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("user.json");

    Mock::given(method("GET"))
        .and(path("/users/user-123"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let transport = Transport::authenticated_with_base_url(&mock_server.uri(), store).unwrap();
    let result = transport.get::<User>("/users/user-123", None).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn public_transport_never_attaches_credentials() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("products.json");

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    // A token exists in the process, but the public transport has no way to
    // reach it.
    let _ambient = MemoryTokenStore::with_token("ambient-token");
    let transport = Transport::public_with_base_url(&mock_server.uri()).unwrap();
    let result = transport.get::<Vec<Product>>("/products", None).await;
    assert!(result.is_ok());
    assert!(!transport.is_authenticated());
}

#[tokio::test]
async fn unauthorized_clears_token_and_next_request_omits_header() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("user.json");

    Mock::given(method("GET"))
        .and(path("/users/user-123"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/user-123"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token("stale-token"));
    let transport =
        Transport::authenticated_with_base_url(&mock_server.uri(), store.clone()).unwrap();

    let first = transport.get::<User>("/users/user-123", None).await;
    match first {
        Err(Error::HttpStatus { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected 401, got {:?}", other.map(|_| ())),
    }
    assert_eq!(store.get(), None);

    // With the token gone, the retry goes out bare and reaches the no-auth mock.
    let second = transport.get::<User>("/users/user-123", None).await;
    assert!(second.is_ok());
}

#[tokio::test]
async fn post_sends_body_and_returns_envelope_unmodified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(serde_json::json!({
            "name": "Pen",
            "price": 10.0,
            "category": "office"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string(
            r#"{"data":{"id":"p-7","name":"Pen","price":10.0,"category":"office"},"message":"created","status":201}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = Transport::public_with_base_url(&mock_server.uri()).unwrap();
    let body = serde_json::json!({"name": "Pen", "price": 10.0, "category": "office"});
    let resp = transport.post::<Product, _>("/products", &body).await.unwrap();
    assert_eq!(resp.data.id, "p-7");
    assert_eq!(resp.message.as_deref(), Some("created"));
    assert_eq!(resp.status, Some(201));
}

#[tokio::test]
async fn delete_sends_variables_as_request_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/products/42"))
        .and(body_json(serde_json::json!({"id": "42"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"data":{"success":true}}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("test-token"));
    let transport = Transport::authenticated_with_base_url(&mock_server.uri(), store).unwrap();
    let body = serde_json::json!({"id": "42"});
    let resp = transport.delete::<DeleteReceipt, _>("/products/42", &body).await.unwrap();
    assert!(resp.data.success);
}
