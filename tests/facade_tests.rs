//! Integration tests for the `BigCommerce` facade.
//!
//! These tests drive the facade against a mock store API and login host and
//! check the requests that reach the wire.

use std::collections::HashMap;
use std::sync::Mutex;

use bigcommerce_api::auth::jwt::{CustomerLoginClaims, CustomerLoginOptions, DEFAULT_CHANNEL_ID};
use bigcommerce_api::auth::signed_payload::sign_payload;
use bigcommerce_api::clients::{ApiRequest, ApiResponse, ResponseBody, Transport, TransportError};
use bigcommerce_api::{
    AccessToken, ApiError, ApiVersion, AppUser, AuthQuery, BigCommerce, BigCommerceConfig,
    ClientId, ClientSecret, ConfigError, ConfigOptions, HostUrl, HttpMethod, OAuthError,
    ResponseFormat, StoreHash, TokenError,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "test-client-secret";

/// Builds a config whose API and login hosts point at `server`.
fn config_for(server: &MockServer) -> BigCommerceConfig {
    BigCommerceConfig::builder()
        .client_id(ClientId::new("test-client-id").unwrap())
        .secret(ClientSecret::new(SECRET).unwrap())
        .store_hash(StoreHash::new("abc123").unwrap())
        .access_token(AccessToken::new("test-access-token").unwrap())
        .callback(HostUrl::new("https://app.example.com/auth").unwrap())
        .api_url(HostUrl::new(server.uri()).unwrap())
        .login_url(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

/// A transport that records requests and never touches the network.
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
}

impl Transport for RecordingTransport {
    async fn run(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        Ok(ApiResponse::new(200, HashMap::new(), ResponseBody::Json(json!({}))))
    }
}

// ============================================================================
// Store API calls
// ============================================================================

#[tokio::test]
async fn test_get_sends_authenticated_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v2/products"))
        .and(query_param("limit", "5"))
        .and(header("X-Auth-Client", "test-client-id"))
        .and(header("X-Auth-Token", "test-access-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = BigCommerce::new(config_for(&server));
    let response = assert_ok!(client.get("/products?limit=5").await);

    assert_eq!(response.json(), Some(&json!([{"id": 1}])));
}

#[tokio::test]
async fn test_v3_post_and_put_send_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stores/abc123/v3/catalog/products"))
        .and(body_json(json!({"name": "Shirt"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 7}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/stores/abc123/v3/catalog/products/7"))
        .and(body_json(json!({"price": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 7}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = BigCommerceConfig::builder()
        .client_id(ClientId::new("test-client-id").unwrap())
        .secret(ClientSecret::new(SECRET).unwrap())
        .store_hash(StoreHash::new("abc123").unwrap())
        .access_token(AccessToken::new("test-access-token").unwrap())
        .api_version(ApiVersion::V3)
        .api_url(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let client = BigCommerce::new(config);

    let created = assert_ok!(client.post("/catalog/products", json!({"name": "Shirt"})).await);
    assert_eq!(created.json().unwrap()["data"]["id"], 7);
    assert_ok!(client.put("/catalog/products/7", json!({"price": 10})).await);
}

#[tokio::test]
async fn test_delete_and_explicit_version() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/stores/abc123/v3/catalog/products/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/stores/abc123/v2/orders/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = BigCommerce::new(config_for(&server));
    assert_ok!(client.delete("/orders/9").await);
    assert_ok!(
        client
            .request_version(&ApiVersion::V3, HttpMethod::Delete, "/catalog/products/7", None)
            .await
    );
}

#[tokio::test]
async fn test_api_error_passes_through_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v2/orders/404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!([{"status": 404, "message": "The requested resource was not found."}])),
        )
        .mount(&server)
        .await;

    let client = BigCommerce::new(config_for(&server));
    let error = assert_err!(client.get("/orders/404").await);

    match error {
        ApiError::Transport(TransportError::Response(e)) => {
            assert_eq!(e.code, 404);
            assert!(e.message.contains("not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_fails_fast_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-Rate-Limit-Time-Reset-Ms", "4000")
                .insert_header("X-Rate-Limit-Requests-Left", "0"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = BigCommerceConfig::try_from(ConfigOptions {
        client_id: Some("test-client-id".to_string()),
        secret: Some(SECRET.to_string()),
        store_hash: Some("abc123".to_string()),
        access_token: Some("test-access-token".to_string()),
        api_url: Some(server.uri()),
        fail_on_limit_reached: true,
        ..ConfigOptions::default()
    })
    .unwrap();

    let client = BigCommerce::new(config);
    let error = assert_err!(client.get("/products").await);
    assert!(matches!(
        error,
        ApiError::Transport(TransportError::RateLimited { retry_after_ms: 4000 })
    ));
}

#[tokio::test]
async fn test_xml_response_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v2/products.xml"))
        .and(query_param("page", "2"))
        .and(header("Accept", "application/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<products/>", "application/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let config = BigCommerceConfig::builder()
        .client_id(ClientId::new("test-client-id").unwrap())
        .secret(ClientSecret::new(SECRET).unwrap())
        .store_hash(StoreHash::new("abc123").unwrap())
        .access_token(AccessToken::new("test-access-token").unwrap())
        .response_type(ResponseFormat::Xml)
        .api_url(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();

    let client = BigCommerce::new(config);
    let response = assert_ok!(client.get("/products?page=2").await);
    assert_eq!(response.body.as_xml(), Some("<products/>"));
}

#[tokio::test]
async fn test_missing_credentials_make_no_network_call() {
    let config = BigCommerceConfig::builder()
        .client_id(ClientId::new("test-client-id").unwrap())
        .secret(ClientSecret::new(SECRET).unwrap())
        .store_hash(StoreHash::new("abc123").unwrap())
        .build()
        .unwrap();
    let client = BigCommerce::with_transport(config, RecordingTransport::default());

    for result in [
        client.get("/products").await,
        client.post("/products", json!({})).await,
        client.put("/products/1", json!({})).await,
        client.delete("/products/1").await,
    ] {
        assert!(matches!(
            result,
            Err(ApiError::MissingCredentials { field: "access_token" })
        ));
    }
    assert!(client.transport().requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_without_body_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = BigCommerce::with_transport(config_for(&server), RecordingTransport::default());

    let error = assert_err!(client.request(HttpMethod::Post, "/products", None).await);
    assert!(matches!(
        error,
        ApiError::Transport(TransportError::InvalidRequest(_))
    ));
    assert!(client.transport().requests.lock().unwrap().is_empty());
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn test_authorize_exchanges_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_json(json!({
            "client_id": "test-client-id",
            "client_secret": SECRET,
            "redirect_uri": "https://app.example.com/auth",
            "grant_type": "authorization_code",
            "code": "qr6h3thvbvag2ffq",
            "scope": "store_v2_orders store_v2_products",
            "context": "stores/abc123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "g3y3ab5mns1kc6pj7eu0yh6v6cqd7b4",
            "scope": "store_v2_orders store_v2_products",
            "user": { "id": 24654, "email": "merchant@example.com" },
            "context": "stores/abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BigCommerce::new(config_for(&server));
    let query = AuthQuery::parse(
        "code=qr6h3thvbvag2ffq&scope=store_v2_orders+store_v2_products&context=stores%2Fabc123",
    )
    .unwrap();

    let response = assert_ok!(client.authorize(Some(&query)).await);
    assert_eq!(response.access_token(), Some("g3y3ab5mns1kc6pj7eu0yh6v6cqd7b4"));
    assert_eq!(response.store_hash(), Some("abc123"));
    assert_eq!(response.user().unwrap()["email"], "merchant@example.com");
}

#[tokio::test]
async fn test_authorize_without_query_makes_no_network_call() {
    let server = MockServer::start().await;
    let client = BigCommerce::with_transport(config_for(&server), RecordingTransport::default());

    let error = assert_err!(client.authorize(None).await);
    assert!(matches!(error, OAuthError::InvalidArgument { .. }));
    assert!(client.transport().requests.lock().unwrap().is_empty());
}

// ============================================================================
// Tokens
// ============================================================================

#[tokio::test]
async fn test_customer_login_token_uses_platform_clock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v2/time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"time": 1_700_000_000})))
        .expect(1)
        .mount(&server)
        .await;

    let client = BigCommerce::new(config_for(&server));
    let options = CustomerLoginOptions::new()
        .use_bc_time(true)
        .redirect_url("/account.php")
        .request_ip("2001:db8::7");

    let token = assert_ok!(
        client
            .issue_customer_login_token(42, DEFAULT_CHANNEL_ID, &options)
            .await
    );

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    validation.validate_exp = false;
    let claims = decode::<CustomerLoginClaims>(
        &token,
        &DecodingKey::from_secret(SECRET.as_bytes()),
        &validation,
    )
    .unwrap()
    .claims;

    assert_eq!(claims.iat, 1_700_000_000);
    assert_eq!(claims.operation, "customer_login");
    assert_eq!(claims.store_hash, "abc123");
    assert_eq!(claims.customer_id, 42);
    assert_eq!(claims.channel_id, 1);
    assert_eq!(claims.redirect_url.as_deref(), Some("/account.php"));
    assert_eq!(claims.request_ip, Some("2001:db8::7".parse().unwrap()));
}

#[tokio::test]
async fn test_customer_login_clock_failure_fails_issuance() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v2/time"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = BigCommerce::new(config_for(&server));
    let error = assert_err!(
        client
            .issue_customer_login_token(42, 1, &CustomerLoginOptions::new().use_bc_time(true))
            .await
    );
    assert!(matches!(error, TokenError::Transport(TransportError::Response(_))));
}

#[tokio::test]
async fn test_customer_login_with_out_of_range_platform_time_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v2/time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"time": i64::MAX})))
        .expect(1)
        .mount(&server)
        .await;

    let client = BigCommerce::new(config_for(&server));
    let error = assert_err!(
        client
            .issue_customer_login_token(1, 1, &CustomerLoginOptions::new().use_bc_time(true))
            .await
    );
    assert!(matches!(error, TokenError::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_invalid_ip_is_rejected() {
    let client = BigCommerce::with_transport(
        config_for(&MockServer::start().await),
        RecordingTransport::default(),
    );
    let error = assert_err!(
        client
            .issue_customer_login_token(
                42,
                3,
                &CustomerLoginOptions::new().request_ip("999.999.999.999")
            )
            .await
    );
    assert!(matches!(error, TokenError::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_app_context_token_round_trips_through_verify_jwt() {
    let server = MockServer::start().await;
    let client = BigCommerce::new(config_for(&server));
    let user = AppUser::new(24654, "merchant@example.com");

    let token = assert_ok!(client.issue_app_context_token(&user, "stores/abc123", Some("/orders")));
    let claims = assert_ok!(client.verify_jwt(&token));

    assert_eq!(claims.user, user);
    assert_eq!(claims.owner, user);
    assert_eq!(claims.sub, "stores/abc123");
    assert_eq!(claims.url, "/orders");
}

#[tokio::test]
async fn test_verify_legacy_payload() {
    let server = MockServer::start().await;
    let client = BigCommerce::new(config_for(&server));
    let data = json!({"store_hash": "abc123", "user": {"id": 1, "email": "a@example.com"}});

    let payload = sign_payload(&data.to_string(), SECRET);
    assert_eq!(assert_ok!(client.verify_legacy_payload(&payload)), data);
    assert_err!(client.verify_legacy_payload(&sign_payload(&data.to_string(), "wrong")));
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_options_loads_camel_case_json() {
    let options: ConfigOptions = serde_json::from_str(
        r#"{
            "clientId": "test-client-id",
            "secret": "test-client-secret",
            "callback": "https://app.example.com/auth",
            "accessToken": "test-access-token",
            "storeHash": "stores/abc123",
            "apiVersion": "v3",
            "responseType": "xml",
            "headers": { "X-Custom": "1" },
            "failOnLimitReached": true
        }"#,
    )
    .unwrap();

    let client = assert_ok!(BigCommerce::from_options(Some(options)));
    let config = client.config();
    assert_eq!(config.store_hash().unwrap().as_ref(), "abc123");
    assert_eq!(config.api_version(), &ApiVersion::V3);
    assert_eq!(config.response_type(), ResponseFormat::Xml);
    assert_eq!(config.headers()["X-Custom"], "1");
    assert!(config.fail_on_limit_reached());
}

#[test]
fn test_from_options_rejects_missing_and_incomplete_config() {
    assert!(matches!(
        BigCommerce::from_options(None),
        Err(ConfigError::MissingConfiguration)
    ));
    assert!(matches!(
        BigCommerce::from_options(Some(ConfigOptions {
            secret: Some("s".to_string()),
            ..ConfigOptions::default()
        })),
        Err(ConfigError::MissingRequiredField { field: "client_id" })
    ));
}
