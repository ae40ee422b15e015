//! OAuth-specific error types.
//!
//! # Error Types
//!
//! - [`OAuthError::InvalidArgument`]: The callback query is absent or incomplete
//! - [`OAuthError::MissingCallbackUrl`]: No callback URL is configured
//! - [`OAuthError::Transport`]: The token request failed
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::MissingCallbackUrl;
//! assert!(error.to_string().contains("callback"));
//! ```

use crate::clients::TransportError;
use thiserror::Error;

/// Errors that can occur during the authorization-code exchange.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::auth::oauth::OAuthError;
///
/// fn describe(err: &OAuthError) -> String {
///     match err {
///         OAuthError::InvalidArgument { reason } => format!("bad callback: {reason}"),
///         OAuthError::MissingCallbackUrl => "configure a callback URL".to_string(),
///         OAuthError::Transport(e) => format!("token request failed: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The callback query is missing or lacks `code`, `scope` or `context`.
    ///
    /// Raised before any request is made.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the query.
        reason: String,
    },

    /// The config has no callback URL to send as `redirect_uri`.
    #[error("A callback URL must be configured to authorize an installation")]
    MissingCallbackUrl,

    /// The token request failed; the error is passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
