//! BigCommerce API version and response format definitions.
//!
//! This module provides the [`ApiVersion`] enum for selecting which version of
//! the store API a path targets, and [`ResponseFormat`] for selecting between
//! JSON and XML responses.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// BigCommerce store API version.
///
/// The version is a path segment (`/stores/{hash}/{version}/...`). `v3` is
/// JSON-only; every other version takes the legacy path rules, where an XML
/// response is requested with a `.xml` extension on the resource path.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::ApiVersion;
///
/// let version: ApiVersion = "v3".parse().unwrap();
/// assert_eq!(version, ApiVersion::V3);
/// assert!(version.is_v3());
///
/// assert_eq!(ApiVersion::default(), ApiVersion::V2);
/// assert_eq!(ApiVersion::V2.to_string(), "v2");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// The legacy v2 API (the default).
    #[default]
    V2,
    /// The v3 API.
    V3,
    /// Any other version segment; path rules follow v2.
    Custom(String),
}

impl ApiVersion {
    /// Returns `true` for the v3 API, which never receives a format extension.
    #[must_use]
    pub const fn is_v3(&self) -> bool {
        matches!(self, Self::V3)
    }

    /// Returns the version as a path segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
            Self::Custom(version) => version,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = s.trim();
        match version {
            "v2" => Ok(Self::V2),
            "v3" => Ok(Self::V3),
            _ if !version.is_empty() && version.chars().all(|c| c.is_ascii_alphanumeric()) => {
                Ok(Self::Custom(version.to_string()))
            }
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}

/// The response format requested from the API.
///
/// Selects the `Accept` header and, for non-v3 paths, the path extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    /// JSON responses (the default, never marked with an extension).
    #[default]
    Json,
    /// XML responses.
    Xml,
}

impl ResponseFormat {
    /// Returns the MIME type used for the `Accept` header.
    #[must_use]
    pub const fn accept_header(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }

    /// Returns the extension spliced into non-v3 paths.
    #[must_use]
    pub const fn path_extension(self) -> &'static str {
        match self {
            Self::Json => "",
            Self::Xml => ".xml",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Xml => f.write_str("xml"),
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            _ => Err(ConfigError::InvalidResponseType {
                value: s.to_string(),
            }),
        }
    }
}
