//! Error types for the request transport.
//!
//! # Error Handling
//!
//! - [`ResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxRetriesExceededError`]: Rate-limit retries were exhausted
//! - [`InvalidRequestError`]: The request failed validation before sending
//! - [`TransportError`]: Unified error type for everything a [`Transport`]
//!   can return
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::clients::TransportError;
//!
//! match client.get("/products", None).await {
//!     Ok(response) => println!("Success: {:?}", response.body),
//!     Err(TransportError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(TransportError::RateLimited { retry_after_ms }) => {
//!         println!("Rate limited, retry in {retry_after_ms}ms");
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```
//!
//! [`Transport`]: crate::clients::Transport

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// `message` holds the response body as text, which for the store API is the
/// JSON error document.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::clients::ResponseError;
///
/// let error = ResponseError {
///     code: 404,
///     message: r#"[{"status":404,"message":"The requested resource was not found."}]"#.to_string(),
/// };
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Request returned an error: {code}, {message}")]
pub struct ResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body.
    pub message: String,
}

/// Error returned when rate-limit retries have been exhausted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// The body of the last response.
    pub message: String,
}

/// Error returned when a request fails validation before it is sent.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::clients::InvalidRequestError;
///
/// let error = InvalidRequestError::MissingBody {
///     method: "post".to_string(),
/// };
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("A request path is required.")]
    MissingPath,
}

/// Unified error type for the request transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A non-2xx response.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// A 429 response while `fail_on_limit_reached` is set.
    #[error("You have reached the rate limit for the BigCommerce API. Please retry in {retry_after_ms}ms.")]
    RateLimited {
        /// Milliseconds until the rate-limit window resets.
        retry_after_ms: u64,
    },

    /// Rate-limit retries exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body could not be read.
    #[error("Failed to decode response body: {reason}")]
    Decode {
        /// Why the body could not be decoded.
        reason: String,
    },
}

// Verify TransportError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
};
