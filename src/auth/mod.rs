//! Trust between the app, the platform and storefront customers.
//!
//! # Overview
//!
//! - [`hmac`]: HMAC-SHA256 signatures and constant-time comparison
//! - [`nonce`]: random `jti` generation behind an injectable source
//! - [`signed_payload`]: verification of legacy `data.signature` callbacks
//! - [`jwt`]: HS256 app context and customer login tokens
//! - [`oauth`]: the authorization-code exchange at install time
//!
//! # Inbound vs outbound
//!
//! Callbacks from the platform arrive either as a legacy signed payload or as
//! a JWT; both are verified with the client secret and yield the decoded
//! claims or an error, never a partial result. Outbound tokens are signed with
//! the same secret.

pub mod hmac;
pub mod jwt;
pub mod nonce;
pub mod oauth;
pub mod signed_payload;
