//! # BigCommerce API Rust SDK
//!
//! Authentication and request signing for BigCommerce apps: installing via
//! OAuth, verifying what the platform sends, minting the tokens the platform
//! accepts, and addressing the store API.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`BigCommerceConfig`] and [`BigCommerceConfigBuilder`],
//!   or camelCase [`ConfigOptions`] loaded with serde
//! - Validated newtypes for credentials and hosts
//! - The OAuth 2.0 authorization-code exchange via [`auth::oauth`]
//! - Verification of legacy signed payloads via [`auth::signed_payload`]
//! - HS256 app context and customer login tokens via [`auth::jwt`]
//! - Versioned, authenticated store API paths via [`rest`]
//! - A pluggable async [`Transport`](clients::Transport) with a `reqwest` default
//!   that honours the platform's rate limits
//!
//! ## Quick Start
//!
//! ```rust
//! use bigcommerce_api::{BigCommerceConfig, ClientId, ClientSecret, StoreHash, AccessToken, ApiVersion};
//!
//! let config = BigCommerceConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .secret(ClientSecret::new("your-client-secret").unwrap())
//!     .store_hash(StoreHash::new("abc123").unwrap())
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .api_version(ApiVersion::V3)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Installing the App
//!
//! ```rust,ignore
//! use bigcommerce_api::{BigCommerce, BigCommerceConfig, HostUrl};
//! use bigcommerce_api::auth::oauth::AuthQuery;
//!
//! let client = BigCommerce::new(config);
//!
//! // In the auth callback handler:
//! let query = AuthQuery::parse(query_string)?;
//! let response = client.authorize(Some(&query)).await?;
//! // Persist response.access_token() for response.store_hash()
//! ```
//!
//! ## Verifying Callbacks
//!
//! ```rust,ignore
//! // Legacy signed_payload
//! let data = client.verify_legacy_payload(&signed_payload)?;
//!
//! // signed_payload_jwt
//! let claims = client.verify_jwt(&signed_payload_jwt)?;
//! println!("Store: {:?}, user: {}", claims.store_hash(), claims.user.email);
//! ```
//!
//! ## Logging a Customer In
//!
//! ```rust,ignore
//! use bigcommerce_api::auth::jwt::{CustomerLoginOptions, DEFAULT_CHANNEL_ID};
//!
//! let options = CustomerLoginOptions::new().redirect_url("/account.php");
//! let token = client
//!     .issue_customer_login_token(42, DEFAULT_CHANNEL_ID, &options)
//!     .await?;
//! let url = format!("https://store.example.com/login/token/{token}");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! let products = client.get("/catalog/products?limit=5").await?;
//! let created = client
//!     .post("/catalog/products", serde_json::json!({"name": "Shirt", "type": "physical"}))
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No persistence**: Tokens are returned, never cached or stored

pub mod auth;
mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use client::BigCommerce;
pub use config::{
    AccessToken, ApiVersion, BigCommerceConfig, BigCommerceConfigBuilder, ClientId, ClientSecret,
    ConfigOptions, HostUrl, ResponseFormat, StoreHash,
};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    ApiRequest, ApiResponse, HttpMethod, ReqwestTransport, ResponseBody, Transport, TransportError,
};

// Re-export auth types for convenience
pub use auth::jwt::{AppContextClaims, AppUser, CustomerLoginOptions, TokenError};
pub use auth::oauth::{AuthQuery, AuthorizationResponse, OAuthError};
pub use auth::signed_payload::SignedPayloadError;
pub use rest::ApiError;
