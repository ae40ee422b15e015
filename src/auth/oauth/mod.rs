//! OAuth 2.0 authorization-code flow for app installation.
//!
//! 1. The merchant installs the app and the platform redirects to the
//!    configured callback with `code`, `scope` and `context`
//!    ([`AuthQuery`]).
//! 2. [`authorize`] posts those, together with the client credentials and the
//!    callback URL, to `{login_url}/oauth2/token`.
//! 3. The platform answers with a permanent access token, the installing user
//!    and the store context ([`AuthorizationResponse`]).
//!
//! Tokens are not cached or stored; persisting them is the caller's job.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::BigCommerce;
//! use bigcommerce_api::auth::oauth::AuthQuery;
//!
//! // In your callback handler:
//! let query = AuthQuery::parse(request_query_string)?;
//! let response = client.authorize(Some(&query)).await?;
//! save_token(response.store_hash(), response.access_token());
//! ```

mod auth_query;
mod authorize;
mod error;

pub use auth_query::AuthQuery;
pub use authorize::{authorize, AuthorizationRequest, AuthorizationResponse, TOKEN_PATH};
pub use error::OAuthError;
