//! Signing and verification of HS256 tokens.
//!
//! [`TokenIssuer`] holds the app's signing material and mints the two token
//! shapes in [`super::claims`]. Verification always pins the algorithm to
//! [`SIGNING_ALGORITHM`] and the audience to the client ID; callers cannot
//! widen either.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::{AppContextClaims, AppUser, CustomerLoginClaims};
use super::error::TokenError;
use crate::auth::nonce::{generate_jti, NonceSource, OsNonceSource};
use crate::config::{BigCommerceConfig, StoreHash};

/// The only algorithm used to sign or accept tokens.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Lifetime of issued tokens (24 hours).
pub const TOKEN_TTL_SECS: i64 = 86_400;

/// Clock skew tolerated when checking `exp`.
const JWT_LEEWAY_SECS: u64 = 0;

/// Default `url` claim for app context tokens.
const DEFAULT_APP_URL: &str = "/";

/// Caller options for a customer login token.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::auth::jwt::CustomerLoginOptions;
///
/// let options = CustomerLoginOptions::new()
///     .redirect_url("/account.php")
///     .request_ip("203.0.113.7");
/// assert!(options.parsed_request_ip().unwrap().is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerLoginOptions {
    redirect_url: Option<String>,
    request_ip: Option<String>,
    use_bc_time: bool,
}

impl CustomerLoginOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the post-login redirect. An empty string is treated as unset.
    #[must_use]
    pub fn redirect_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.redirect_url = (!url.is_empty()).then_some(url);
        self
    }

    /// Pins the token to a client IP literal (validated at issuance).
    #[must_use]
    pub fn request_ip(mut self, ip: impl Into<String>) -> Self {
        self.request_ip = Some(ip.into());
        self
    }

    /// Uses the platform clock for `iat` instead of the local one.
    #[must_use]
    pub const fn use_bc_time(mut self, use_bc_time: bool) -> Self {
        self.use_bc_time = use_bc_time;
        self
    }

    /// Returns the configured redirect.
    #[must_use]
    pub fn redirect_url_value(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Returns whether the platform clock should be used.
    #[must_use]
    pub const fn uses_bc_time(&self) -> bool {
        self.use_bc_time
    }

    /// Parses the request IP, if one was given.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidArgument`] if the literal is not an IPv4 or
    /// IPv6 address.
    pub fn parsed_request_ip(&self) -> Result<Option<IpAddr>, TokenError> {
        self.request_ip
            .as_deref()
            .map(|ip| {
                ip.parse::<IpAddr>()
                    .map_err(|_| TokenError::InvalidArgument {
                        reason: format!("request_ip '{ip}' is not a valid IP address"),
                    })
            })
            .transpose()
    }
}

/// Issues and verifies the app's HS256 tokens.
///
/// # Thread Safety
///
/// `TokenIssuer` is `Send + Sync`; the only interior state is the shared
/// [`NonceSource`].
#[derive(Clone)]
pub struct TokenIssuer {
    client_id: String,
    store_hash: Option<StoreHash>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    nonce_source: Arc<dyn NonceSource>,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("client_id", &self.client_id)
            .field("store_hash", &self.store_hash)
            .field("algorithm", &SIGNING_ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates an issuer keyed with the config's client secret.
    #[must_use]
    pub fn new(config: &BigCommerceConfig) -> Self {
        let secret = config.secret().as_ref().as_bytes();
        Self {
            client_id: config.client_id().as_ref().to_string(),
            store_hash: config.store_hash().cloned(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            nonce_source: Arc::new(OsNonceSource),
        }
    }

    /// Replaces the random source used for `jti` values.
    #[must_use]
    pub fn with_nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = source;
        self
    }

    /// Issues an app context token for `user` in `context` (e.g. `stores/abc123`).
    ///
    /// `url` defaults to `/`. The token expires 24 hours from now.
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
        let expires_at = chrono::Utc::now().timestamp() + TOKEN_TTL_SECS;
        let claims = AppContextClaims::new(
            &self.client_id,
            user,
            context,
            url.unwrap_or(DEFAULT_APP_URL),
            expires_at,
        );
        self.sign(&claims)
    }

    /// Issues a storefront customer login token issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidArgument`] if the request IP is not an IP address,
    ///   or `issued_at` is too large to add the token lifetime to
    /// - [`TokenError::MissingCredentials`] if no store hash is configured
    /// - [`TokenError::Signing`] if encoding fails
    pub fn issue_customer_login_token(
        &self,
        customer_id: u64,
        channel_id: u64,
        options: &CustomerLoginOptions,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let request_ip = options.parsed_request_ip()?;
        let store_hash = self
            .store_hash
            .as_ref()
            .ok_or(TokenError::MissingCredentials { field: "store_hash" })?;

        let jti = generate_jti(self.nonce_source.as_ref());
        let mut builder = CustomerLoginClaims::builder(
            self.client_id.as_str(),
            store_hash.as_ref(),
            customer_id,
            jti,
            issued_at,
        )
        .channel_id(channel_id);
        if let Some(url) = options.redirect_url_value() {
            builder = builder.redirect_url(url);
        }
        if let Some(ip) = request_ip {
            builder = builder.request_ip(ip);
        }

        self.sign(&builder.build()?)
    }

    /// Verifies `token` and returns its claims.
    ///
    /// Only HS256 tokens whose `aud` is the client ID and whose `exp` has not
    /// passed are accepted.
    ///
    /// # Errors
    ///
    /// - [`TokenError::TokenExpired`] if `exp` is in the past
    /// - [`TokenError::InvalidAudience`] if `aud` is missing or is not the client ID
    /// - [`TokenError::InvalidSignature`] if the signature does not verify or
    ///   the header names another algorithm
    /// - [`TokenError::MalformedToken`] for anything structurally wrong
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode::<C>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(|e| TokenError::from_decode_error(&e))
    }

    /// Verifies an app context (or platform load) token.
    ///
    /// # Errors
    ///
    /// See [`TokenIssuer::verify`].
    pub fn verify_app_context(&self, token: &str) -> Result<AppContextClaims, TokenError> {
        self.verify(token)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = JWT_LEEWAY_SECS;
        validation.set_audience(&[self.client_id.as_str()]);
        validation.set_required_spec_claims(&["exp", "aud"]);
        validation
    }

    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }
}

// Verify TokenIssuer is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenIssuer>();
};
