//! Claim sets for the tokens this SDK issues and verifies.
//!
//! Two shapes exist:
//!
//! - [`AppContextClaims`]: hands an embedded app its store and user context.
//!   The same shape is used by the platform's own app load JWTs.
//! - [`CustomerLoginClaims`]: logs a customer into a storefront channel.
//!   Optional claims are `Option` fields that are left out of the token
//!   entirely when absent; values are only set through
//!   [`CustomerLoginClaimsBuilder`].

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::TokenError;

/// Value of the `operation` claim for customer login tokens.
pub const CUSTOMER_LOGIN_OPERATION: &str = "customer_login";

/// Channel used when the caller does not name one.
pub const DEFAULT_CHANNEL_ID: u64 = 1;

/// A store user as it appears in the `user` and `owner` claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    /// BigCommerce user ID.
    pub id: u64,
    /// The user's email address.
    pub email: String,
    /// The user's locale, when the platform provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl AppUser {
    /// Creates a user without a locale.
    #[must_use]
    pub fn new(id: u64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            locale: None,
        }
    }
}

/// Claims of an app context token.
///
/// `aud` and `iss` are both the app's client ID, `sub` is the store context
/// (`stores/{hash}`) and `owner` mirrors `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContextClaims {
    /// Audience: the client ID.
    pub aud: String,
    /// Issuer.
    pub iss: String,
    /// Subject: the store context.
    pub sub: String,
    /// The acting user.
    pub user: AppUser,
    /// The store owner.
    pub owner: AppUser,
    /// The app path to open.
    pub url: String,
    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
}

impl AppContextClaims {
    /// Builds app context claims issued by `client_id`, expiring at `expires_at`.
    #[must_use]
    pub fn new(
        client_id: &str,
        user: &AppUser,
        context: impl Into<String>,
        url: impl Into<String>,
        expires_at: i64,
    ) -> Self {
        Self {
            aud: client_id.to_string(),
            iss: client_id.to_string(),
            sub: context.into(),
            user: user.clone(),
            owner: user.clone(),
            url: url.into(),
            exp: expires_at,
        }
    }

    /// Returns the store hash named by the `sub` context, if it has the
    /// `stores/{hash}` form.
    #[must_use]
    pub fn store_hash(&self) -> Option<&str> {
        self.sub
            .strip_prefix("stores/")
            .filter(|hash| !hash.is_empty())
    }
}

/// Claims of a storefront customer login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerLoginClaims {
    /// Issuer: the client ID.
    pub iss: String,
    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,
    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
    /// Random 256-bit hex identifier.
    pub jti: String,
    /// Always [`CUSTOMER_LOGIN_OPERATION`].
    pub operation: String,
    /// The store the customer belongs to.
    pub store_hash: String,
    /// The customer to log in.
    pub customer_id: u64,
    /// The storefront channel.
    pub channel_id: u64,
    /// Where to send the customer after login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// The only client IP allowed to redeem the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_ip: Option<IpAddr>,
}

impl CustomerLoginClaims {
    /// Starts building customer login claims.
    ///
    /// `jti` must be freshly generated for every token.
    #[must_use]
    pub fn builder(
        client_id: impl Into<String>,
        store_hash: impl Into<String>,
        customer_id: u64,
        jti: impl Into<String>,
        issued_at: i64,
    ) -> CustomerLoginClaimsBuilder {
        CustomerLoginClaimsBuilder {
            iss: client_id.into(),
            store_hash: store_hash.into(),
            customer_id,
            jti: jti.into(),
            issued_at,
            ttl_secs: super::TOKEN_TTL_SECS,
            channel_id: DEFAULT_CHANNEL_ID,
            redirect_url: None,
            request_ip: None,
        }
    }
}

/// Builder for [`CustomerLoginClaims`].
#[derive(Debug, Clone)]
pub struct CustomerLoginClaimsBuilder {
    iss: String,
    store_hash: String,
    customer_id: u64,
    jti: String,
    issued_at: i64,
    ttl_secs: i64,
    channel_id: u64,
    redirect_url: Option<String>,
    request_ip: Option<IpAddr>,
}

impl CustomerLoginClaimsBuilder {
    /// Sets the channel (default [`DEFAULT_CHANNEL_ID`]).
    #[must_use]
    pub const fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    /// Sets the post-login redirect.
    #[must_use]
    pub fn redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    /// Pins the token to a client IP.
    #[must_use]
    pub const fn request_ip(mut self, ip: IpAddr) -> Self {
        self.request_ip = Some(ip);
        self
    }

    /// Builds the claims; `exp` is `iat` plus the token lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidArgument`] if `exp` would not fit in an
    /// `i64`.
    pub fn build(self) -> Result<CustomerLoginClaims, TokenError> {
        let exp = self
            .issued_at
            .checked_add(self.ttl_secs)
            .ok_or_else(|| TokenError::InvalidArgument {
                reason: format!("issued_at {} is out of range", self.issued_at),
            })?;

        Ok(CustomerLoginClaims {
            iss: self.iss,
            iat: self.issued_at,
            exp,
            jti: self.jti,
            operation: CUSTOMER_LOGIN_OPERATION.to_string(),
            store_hash: self.store_hash,
            customer_id: self.customer_id,
            channel_id: self.channel_id,
            redirect_url: self.redirect_url,
            request_ip: self.request_ip,
        })
    }
}
