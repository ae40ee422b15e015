//! Configuration types for the BigCommerce API SDK.
//!
//! This module provides the configuration types used to initialize the SDK.
//!
//! # Overview
//!
//! - [`BigCommerceConfig`]: The immutable credentials and settings of one client
//! - [`BigCommerceConfigBuilder`]: A builder for constructing [`BigCommerceConfig`]
//! - [`ConfigOptions`]: The camelCase option bag, deserializable from JSON or
//!   any other serde source
//! - Validated newtypes: [`ClientId`], [`ClientSecret`], [`StoreHash`],
//!   [`AccessToken`], [`HostUrl`]
//! - [`ApiVersion`] and [`ResponseFormat`]
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{BigCommerceConfig, ClientId, ClientSecret, StoreHash, AccessToken};
//!
//! let config = BigCommerceConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .secret(ClientSecret::new("my-secret").unwrap())
//!     .store_hash(StoreHash::new("abc123").unwrap())
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ClientId, ClientSecret, HostUrl, StoreHash};
pub use version::{ApiVersion, ResponseFormat};

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default host for the OAuth token endpoint.
pub const DEFAULT_LOGIN_URL: &str = "https://login.bigcommerce.com";

/// Default host for the store API.
pub const DEFAULT_API_URL: &str = "https://api.bigcommerce.com";

/// Configuration for the BigCommerce API SDK.
///
/// # Thread Safety
///
/// `BigCommerceConfig` is `Clone`, `Send`, and `Sync`. It has no setters:
/// once built it never changes.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::{BigCommerceConfig, ClientId, ClientSecret, ApiVersion, ResponseFormat};
///
/// let config = BigCommerceConfig::builder()
///     .client_id(ClientId::new("id").unwrap())
///     .secret(ClientSecret::new("secret").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_version(), &ApiVersion::V2);
/// assert_eq!(config.response_type(), ResponseFormat::Json);
/// assert_eq!(config.login_url().as_ref(), "https://login.bigcommerce.com");
/// ```
#[derive(Clone, Debug)]
pub struct BigCommerceConfig {
    client_id: ClientId,
    secret: ClientSecret,
    callback: Option<HostUrl>,
    access_token: Option<AccessToken>,
    store_hash: Option<StoreHash>,
    api_version: ApiVersion,
    response_type: ResponseFormat,
    headers: HashMap<String, String>,
    login_url: HostUrl,
    api_url: HostUrl,
    fail_on_limit_reached: bool,
}

impl BigCommerceConfig {
    /// Creates a new builder for constructing a `BigCommerceConfig`.
    #[must_use]
    pub fn builder() -> BigCommerceConfigBuilder {
        BigCommerceConfigBuilder::new()
    }

    /// Returns the app client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the app client secret.
    #[must_use]
    pub const fn secret(&self) -> &ClientSecret {
        &self.secret
    }

    /// Returns the OAuth callback URL, if configured.
    #[must_use]
    pub const fn callback(&self) -> Option<&HostUrl> {
        self.callback.as_ref()
    }

    /// Returns the store access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the store hash, if configured.
    #[must_use]
    pub const fn store_hash(&self) -> Option<&StoreHash> {
        self.store_hash.as_ref()
    }

    /// Returns the default API version for resource calls.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the requested response format.
    #[must_use]
    pub const fn response_type(&self) -> ResponseFormat {
        self.response_type
    }

    /// Returns the extra headers merged over the defaults on every API call.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the OAuth login host.
    #[must_use]
    pub const fn login_url(&self) -> &HostUrl {
        &self.login_url
    }

    /// Returns the store API host.
    #[must_use]
    pub const fn api_url(&self) -> &HostUrl {
        &self.api_url
    }

    /// Returns whether a rate-limited response should fail instead of waiting.
    #[must_use]
    pub const fn fail_on_limit_reached(&self) -> bool {
        self.fail_on_limit_reached
    }
}

// Verify BigCommerceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BigCommerceConfig>();
};

/// Builder for constructing [`BigCommerceConfig`] instances.
///
/// Required fields are `client_id` and `secret`.
///
/// # Defaults
///
/// - `api_version`: `v2`
/// - `response_type`: JSON
/// - `login_url`: [`DEFAULT_LOGIN_URL`]
/// - `api_url`: [`DEFAULT_API_URL`]
/// - `fail_on_limit_reached`: `false`
/// - everything else: unset
#[derive(Debug, Default)]
pub struct BigCommerceConfigBuilder {
    client_id: Option<ClientId>,
    secret: Option<ClientSecret>,
    callback: Option<HostUrl>,
    access_token: Option<AccessToken>,
    store_hash: Option<StoreHash>,
    api_version: Option<ApiVersion>,
    response_type: Option<ResponseFormat>,
    headers: HashMap<String, String>,
    login_url: Option<HostUrl>,
    api_url: Option<HostUrl>,
    fail_on_limit_reached: bool,
}

impl BigCommerceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the client secret (required).
    #[must_use]
    pub fn secret(mut self, secret: ClientSecret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Sets the OAuth callback URL sent as `redirect_uri` during authorization.
    #[must_use]
    pub fn callback(mut self, callback: HostUrl) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Sets the store access token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the store hash.
    #[must_use]
    pub fn store_hash(mut self, store_hash: StoreHash) -> Self {
        self.store_hash = Some(store_hash);
        self
    }

    /// Sets the API version used for resource calls.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the response format.
    #[must_use]
    pub const fn response_type(mut self, format: ResponseFormat) -> Self {
        self.response_type = Some(format);
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Overrides the OAuth login host.
    #[must_use]
    pub fn login_url(mut self, url: HostUrl) -> Self {
        self.login_url = Some(url);
        self
    }

    /// Overrides the store API host.
    #[must_use]
    pub fn api_url(mut self, url: HostUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets whether a rate-limited response fails immediately.
    #[must_use]
    pub const fn fail_on_limit_reached(mut self, fail: bool) -> Self {
        self.fail_on_limit_reached = fail;
        self
    }

    /// Builds the [`BigCommerceConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id` or
    /// `secret` are not set, or [`ConfigError::InvalidHostUrl`] if a default
    /// host fails to parse.
    pub fn build(self) -> Result<BigCommerceConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let secret = self
            .secret
            .ok_or(ConfigError::MissingRequiredField { field: "secret" })?;

        let login_url = match self.login_url {
            Some(url) => url,
            None => HostUrl::new(DEFAULT_LOGIN_URL)?,
        };
        let api_url = match self.api_url {
            Some(url) => url,
            None => HostUrl::new(DEFAULT_API_URL)?,
        };

        Ok(BigCommerceConfig {
            client_id,
            secret,
            callback: self.callback,
            access_token: self.access_token,
            store_hash: self.store_hash,
            api_version: self.api_version.unwrap_or_default(),
            response_type: self.response_type.unwrap_or_default(),
            headers: self.headers,
            login_url,
            api_url,
            fail_on_limit_reached: self.fail_on_limit_reached,
        })
    }
}

/// The recognized configuration options in their camelCase wire form.
///
/// This is the shape apps typically keep in a JSON settings file or
/// environment-derived map. Convert it with [`BigCommerceConfig::try_from`].
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::{BigCommerceConfig, ConfigOptions, ApiVersion};
///
/// let options: ConfigOptions = serde_json::from_str(r#"{
///     "clientId": "id",
///     "secret": "secret",
///     "storeHash": "abc123",
///     "accessToken": "token",
///     "apiVersion": "v3"
/// }"#).unwrap();
///
/// let config = BigCommerceConfig::try_from(options).unwrap();
/// assert_eq!(config.api_version(), &ApiVersion::V3);
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOptions {
    /// App client ID.
    pub client_id: Option<String>,
    /// App client secret.
    pub secret: Option<String>,
    /// OAuth callback URL.
    pub callback: Option<String>,
    /// Store access token.
    pub access_token: Option<String>,
    /// Store hash (plain or `stores/{hash}`).
    pub store_hash: Option<String>,
    /// API version (`v2` by default).
    pub api_version: Option<String>,
    /// `json` (default) or `xml`.
    pub response_type: Option<String>,
    /// Extra/override headers for API calls.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// OAuth login host override.
    pub login_url: Option<String>,
    /// Store API host override.
    pub api_url: Option<String>,
    /// Fail instead of waiting when rate limited.
    #[serde(default)]
    pub fail_on_limit_reached: bool,
}

impl TryFrom<ConfigOptions> for BigCommerceConfig {
    type Error = ConfigError;

    fn try_from(options: ConfigOptions) -> Result<Self, Self::Error> {
        let mut builder = Self::builder()
            .headers(options.headers)
            .fail_on_limit_reached(options.fail_on_limit_reached);

        if let Some(client_id) = options.client_id {
            builder = builder.client_id(ClientId::new(client_id)?);
        }
        if let Some(secret) = options.secret {
            builder = builder.secret(ClientSecret::new(secret)?);
        }
        if let Some(callback) = options.callback {
            builder = builder.callback(HostUrl::new(callback)?);
        }
        if let Some(token) = options.access_token {
            builder = builder.access_token(AccessToken::new(token)?);
        }
        if let Some(store_hash) = options.store_hash {
            builder = builder.store_hash(StoreHash::new(store_hash)?);
        }
        if let Some(version) = options.api_version {
            builder = builder.api_version(version.parse()?);
        }
        if let Some(response_type) = options.response_type {
            builder = builder.response_type(response_type.parse()?);
        }
        if let Some(login_url) = options.login_url {
            builder = builder.login_url(HostUrl::new(login_url)?);
        }
        if let Some(api_url) = options.api_url {
            builder = builder.api_url(HostUrl::new(api_url)?);
        }

        builder.build()
    }
}
