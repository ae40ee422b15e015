//! HS256 JWT issuance and verification.
//!
//! # Overview
//!
//! - [`TokenIssuer`]: signs app context and customer login tokens and verifies
//!   inbound tokens against the client secret
//! - [`AppContextClaims`] / [`CustomerLoginClaims`]: the claim sets
//! - [`CustomerLoginOptions`]: caller options for customer login
//! - [`TokenError`]: everything that can go wrong
//!
//! # Algorithm pinning
//!
//! Tokens are signed with [`SIGNING_ALGORITHM`] and verification accepts
//! nothing else, so a token whose header names `none` or an asymmetric
//! algorithm is rejected before its claims are read.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{BigCommerceConfig, ClientId, ClientSecret};
//! use bigcommerce_api::auth::jwt::{AppUser, TokenIssuer};
//!
//! let config = BigCommerceConfig::builder()
//!     .client_id(ClientId::new("client-id").unwrap())
//!     .secret(ClientSecret::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let issuer = TokenIssuer::new(&config);
//! let user = AppUser::new(1, "owner@example.com");
//! let token = issuer.issue_app_context_token(&user, "stores/abc123", None).unwrap();
//! let claims = issuer.verify_app_context(&token).unwrap();
//! assert_eq!(claims.user, user);
//! ```

mod claims;
mod error;
mod issuer;

pub use claims::{
    AppContextClaims, AppUser, CustomerLoginClaims, CustomerLoginClaimsBuilder,
    CUSTOMER_LOGIN_OPERATION, DEFAULT_CHANNEL_ID,
};
pub use error::TokenError;
pub use issuer::{CustomerLoginOptions, TokenIssuer, SIGNING_ALGORITHM, TOKEN_TTL_SECS};
