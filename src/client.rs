//! The [`BigCommerce`] facade.
//!
//! One facade owns one immutable [`BigCommerceConfig`], a [`TokenIssuer`]
//! keyed with its secret and a [`Transport`]. Every operation the SDK offers
//! is reachable from here.

use std::sync::Arc;

use serde_json::Value;

use crate::auth::jwt::{AppContextClaims, AppUser, CustomerLoginOptions, TokenError, TokenIssuer};
use crate::auth::nonce::NonceSource;
use crate::auth::oauth::{self, AuthQuery, AuthorizationResponse, OAuthError};
use crate::auth::signed_payload::{verify_signed_payload, SignedPayloadError};
use crate::clients::{ApiRequest, ApiResponse, HttpMethod, ReqwestTransport, Transport, TransportError};
use crate::config::{ApiVersion, BigCommerceConfig, ConfigOptions, ResponseFormat};
use crate::error::ConfigError;
use crate::rest::{self, ApiError};

/// Client for a BigCommerce app.
///
/// # Thread Safety
///
/// `BigCommerce` is `Send + Sync` whenever its transport is. Nothing changes
/// after construction; share it behind an `Arc` across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use bigcommerce_api::{BigCommerce, BigCommerceConfig, ClientId, ClientSecret, StoreHash, AccessToken, ApiVersion};
///
/// let config = BigCommerceConfig::builder()
///     .client_id(ClientId::new("client-id")?)
///     .secret(ClientSecret::new("secret")?)
///     .store_hash(StoreHash::new("abc123")?)
///     .access_token(AccessToken::new("token")?)
///     .api_version(ApiVersion::V3)
///     .build()?;
///
/// let client = BigCommerce::new(config);
/// let products = client.get("/catalog/products?limit=5").await?;
/// ```
#[derive(Debug)]
pub struct BigCommerce<T: Transport = ReqwestTransport> {
    config: BigCommerceConfig,
    issuer: TokenIssuer,
    transport: T,
}

// Verify BigCommerce is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BigCommerce>();
};

impl BigCommerce<ReqwestTransport> {
    /// Creates a client with the default transport.
    #[must_use]
    pub fn new(config: BigCommerceConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Creates a client from camelCase options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingConfiguration`] if `options` is `None`, or
    /// any validation error from the options themselves.
    pub fn from_options(options: Option<ConfigOptions>) -> Result<Self, ConfigError> {
        let options = options.ok_or(ConfigError::MissingConfiguration)?;
        Ok(Self::new(BigCommerceConfig::try_from(options)?))
    }
}

impl<T: Transport> BigCommerce<T> {
    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: BigCommerceConfig, transport: T) -> Self {
        let issuer = TokenIssuer::new(&config);
        Self {
            config,
            issuer,
            transport,
        }
    }

    /// Replaces the random source used for customer login `jti` values.
    #[must_use]
    pub fn with_nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
        self.issuer = self.issuer.with_nonce_source(source);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &BigCommerceConfig {
        &self.config
    }

    /// Returns the token issuer.
    #[must_use]
    pub const fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Verifies a legacy `signed_payload` callback and returns its JSON.
    ///
    /// # Errors
    ///
    /// See [`verify_signed_payload`].
    pub fn verify_legacy_payload(&self, signed_payload: &str) -> Result<Value, SignedPayloadError> {
        verify_signed_payload(signed_payload, self.config.secret().as_ref())
    }

    /// Verifies a platform JWT (e.g. the `signed_payload_jwt` of an app load).
    ///
    /// # Errors
    ///
    /// See [`TokenIssuer::verify`].
    pub fn verify_jwt(&self, token: &str) -> Result<AppContextClaims, TokenError> {
        self.issuer.verify_app_context(token)
    }

    /// Issues an app context token; `url` defaults to `/`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if encoding fails.
    pub fn issue_app_context_token(
        &self,
        user: &AppUser,
        context: &str,
        url: Option<&str>,
    ) -> Result<String, TokenError> {
        self.issuer.issue_app_context_token(user, context, url)
    }

    /// Issues a storefront customer login token.
    ///
    /// With [`CustomerLoginOptions::use_bc_time`] the platform clock is
    /// fetched first and used as `iat`; otherwise the local clock is used.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidArgument`] for an invalid request IP, before any
    ///   network call
    /// - [`TokenError::MissingCredentials`] if the store hash (or, with
    ///   `use_bc_time`, the access token) is not configured
    /// - [`TokenError::Transport`] if the clock lookup fails
    pub async fn issue_customer_login_token(
        &self,
        customer_id: u64,
        channel_id: u64,
        options: &CustomerLoginOptions,
    ) -> Result<String, TokenError> {
        options.parsed_request_ip()?;

        let issued_at = if options.uses_bc_time() {
            self.get_time().await.map_err(|e| match e {
                ApiError::MissingCredentials { field } => TokenError::MissingCredentials { field },
                ApiError::Transport(e) => TokenError::Transport(e),
            })?
        } else {
            chrono::Utc::now().timestamp()
        };

        self.issuer
            .issue_customer_login_token(customer_id, channel_id, options, issued_at)
    }

    /// Exchanges an install callback's code for an access token.
    ///
    /// # Errors
    ///
    /// See [`oauth::authorize`].
    pub async fn authorize(
        &self,
        query: Option<&AuthQuery>,
    ) -> Result<AuthorizationResponse, OAuthError> {
        oauth::authorize(&self.config, &self.transport, query).await
    }

    /// Sends a GET request to the configured API version.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingCredentials`] without a network call if the
    /// access token or store hash is missing, and [`ApiError::Transport`] for
    /// anything the transport reports.
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.request(HttpMethod::Get, path, None).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`BigCommerce::get`].
    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`BigCommerce::get`].
    pub async fn put(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`BigCommerce::get`].
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.request(HttpMethod::Delete, path, None).await
    }

    /// Sends a request to the configured API version.
    ///
    /// # Errors
    ///
    /// See [`BigCommerce::get`]; POST and PUT without a body fail with
    /// [`TransportError::InvalidRequest`].
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.request_version(self.config.api_version(), method, path, body)
            .await
    }

    /// Sends a request to an explicit API version, e.g. a `v3` call from a
    /// client configured for `v2`.
    ///
    /// # Errors
    ///
    /// See [`BigCommerce::request`].
    pub async fn request_version(
        &self,
        version: &ApiVersion,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let resolved = rest::resolve(&self.config, version, path)?;
        let request = ApiRequest::builder(self.config.api_url().clone(), method, resolved.path)
            .headers(resolved.headers)
            .maybe_body(body)
            .fail_on_limit_reached(self.config.fail_on_limit_reached())
            .build()?;

        tracing::debug!(method = %method, path = %request.path, "Calling store API");

        Ok(self.transport.run(request).await?)
    }

    /// Returns the platform clock as Unix seconds.
    ///
    /// Always uses the `v2` time endpoint with a JSON response, whatever the
    /// configured version and format.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingCredentials`] if the access token or store hash is missing
    /// - [`ApiError::Transport`] if the call fails or the response has no
    ///   numeric `time` field
    pub async fn get_time(&self) -> Result<i64, ApiError> {
        let mut resolved = rest::resolve(&self.config, &ApiVersion::V2, "/time")?;
        let store_hash = self
            .config
            .store_hash()
            .ok_or(ApiError::MissingCredentials { field: "store_hash" })?;
        resolved
            .headers
            .retain(|key, _| !key.eq_ignore_ascii_case("Accept"));
        resolved.headers.insert(
            "Accept".to_string(),
            ResponseFormat::Json.accept_header().to_string(),
        );

        let request = ApiRequest::builder(
            self.config.api_url().clone(),
            HttpMethod::Get,
            rest::time_path(store_hash.as_ref()),
        )
        .headers(resolved.headers)
        .fail_on_limit_reached(self.config.fail_on_limit_reached())
        .build()?;

        let response = self.transport.run(request).await?;
        response
            .json()
            .and_then(|body| body.get("time"))
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                TransportError::Decode {
                    reason: "time response has no numeric 'time' field".to_string(),
                }
                .into()
            })
    }
}
