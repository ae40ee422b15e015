//! Error types for store API calls.

use thiserror::Error;

use crate::clients::{InvalidRequestError, TransportError};

/// Errors that can occur while resolving or sending a store API call.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::rest::ApiError;
///
/// let error = ApiError::MissingCredentials { field: "access_token" };
/// assert!(error.to_string().contains("access_token"));
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// A credential needed to address the store is not configured.
    ///
    /// Raised before any request is made.
    #[error("Missing credentials: '{field}' must be configured to call the store API")]
    MissingCredentials {
        /// The name of the missing configuration field.
        field: &'static str,
    },

    /// The transport failed; the error is passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<InvalidRequestError> for ApiError {
    fn from(error: InvalidRequestError) -> Self {
        Self::Transport(error.into())
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
