//! The authorization-code exchange.
//!
//! When a merchant installs the app, the platform redirects to the configured
//! callback with an [`AuthQuery`]. [`authorize`] trades that code for a
//! permanent store access token with a single
//! `POST {login_url}/oauth2/token`.

use serde::Serialize;
use serde_json::Value;

use crate::auth::oauth::{AuthQuery, OAuthError};
use crate::clients::{ApiRequest, HttpMethod, Transport, TransportError};
use crate::config::BigCommerceConfig;

/// Path of the token endpoint on the login host.
pub const TOKEN_PATH: &str = "/oauth2/token";

/// Grant type for the authorization-code exchange.
const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";

/// Body of the token request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthorizationRequest {
    /// The app's client ID.
    pub client_id: String,
    /// The app's client secret.
    pub client_secret: String,
    /// The configured callback URL.
    pub redirect_uri: String,
    /// Always `authorization_code`.
    pub grant_type: String,
    /// The temporary code from the callback.
    pub code: String,
    /// The scopes from the callback.
    pub scope: String,
    /// The store context from the callback.
    pub context: String,
}

impl AuthorizationRequest {
    fn new(config: &BigCommerceConfig, redirect_uri: &str, query: &AuthQuery) -> Self {
        Self {
            client_id: config.client_id().as_ref().to_string(),
            client_secret: config.secret().as_ref().to_string(),
            redirect_uri: redirect_uri.to_string(),
            grant_type: AUTHORIZATION_CODE_GRANT_TYPE.to_string(),
            code: query.code.clone(),
            scope: query.scope.clone(),
            context: query.context.clone(),
        }
    }
}

/// The token endpoint's response.
///
/// The document is kept as-is; the accessors cover the fields apps need.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::auth::oauth::AuthorizationResponse;
/// use serde_json::json;
///
/// let response = AuthorizationResponse::from(json!({
///     "access_token": "abc",
///     "scope": "store_v2_orders",
///     "user": { "id": 1, "email": "owner@example.com" },
///     "context": "stores/abc123"
/// }));
///
/// assert_eq!(response.access_token(), Some("abc"));
/// assert_eq!(response.store_hash(), Some("abc123"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationResponse(Value);

impl From<Value> for AuthorizationResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl AuthorizationResponse {
    /// Returns the permanent access token.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.0.get("access_token").and_then(Value::as_str)
    }

    /// Returns the granted scopes.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.0.get("scope").and_then(Value::as_str)
    }

    /// Returns the store context (`stores/{hash}`).
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.0.get("context").and_then(Value::as_str)
    }

    /// Returns the store hash derived from the context.
    #[must_use]
    pub fn store_hash(&self) -> Option<&str> {
        self.context()
            .and_then(|context| context.strip_prefix("stores/"))
            .filter(|hash| !hash.is_empty())
    }

    /// Returns the installing user object.
    #[must_use]
    pub fn user(&self) -> Option<&Value> {
        self.0.get("user")
    }

    /// Returns the raw response document.
    #[must_use]
    pub const fn as_json(&self) -> &Value {
        &self.0
    }

    /// Consumes the response, returning the raw document.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Exchanges an authorization code for a store access token.
///
/// # Errors
///
/// - [`OAuthError::InvalidArgument`] if `query` is `None` (no request is made)
/// - [`OAuthError::MissingCallbackUrl`] if the config has no callback
/// - [`OAuthError::Transport`] if the request fails or the platform rejects it
pub async fn authorize<T: Transport>(
    config: &BigCommerceConfig,
    transport: &T,
    query: Option<&AuthQuery>,
) -> Result<AuthorizationResponse, OAuthError> {
    let query = query.ok_or_else(|| OAuthError::InvalidArgument {
        reason: "The authorization query is required".to_string(),
    })?;
    let callback = config.callback().ok_or(OAuthError::MissingCallbackUrl)?;

    let body = AuthorizationRequest::new(config, callback.as_ref(), query);
    let body = serde_json::to_value(&body).map_err(|e| OAuthError::InvalidArgument {
        reason: e.to_string(),
    })?;

    let request = ApiRequest::builder(config.login_url().clone(), HttpMethod::Post, TOKEN_PATH)
        .header("Accept", "application/json")
        .body(body)
        .fail_on_limit_reached(config.fail_on_limit_reached())
        .build()
        .map_err(TransportError::from)?;

    tracing::debug!(context = %query.context, "Exchanging authorization code");

    let response = transport.run(request).await?;
    let document = response.json().cloned().unwrap_or(Value::Null);
    Ok(AuthorizationResponse(document))
}
