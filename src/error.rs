//! Error types for the BigCommerce API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. No configuration error ever involves the network.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No configuration was supplied at all.
    #[error("Config missing. The config object is required to make any call to the BigCommerce API.")]
    MissingConfiguration,

    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the client ID of your BigCommerce app.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the client secret of your BigCommerce app.")]
    EmptySecret,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty.")]
    EmptyAccessToken,

    /// Store hash is invalid.
    #[error("Invalid store hash '{hash}'. Expected a non-empty alphanumeric value (e.g., 'abc123').")]
    InvalidStoreHash {
        /// The invalid store hash that was provided.
        hash: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected a path segment such as 'v2' or 'v3'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Response type is invalid.
    #[error("Invalid response type '{value}'. Expected 'json' or 'xml'.")]
    InvalidResponseType {
        /// The invalid response type that was provided.
        value: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid URL '{url}'. Please provide a host such as 'api.bigcommerce.com' or a full URL.")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
