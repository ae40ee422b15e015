//! Path and header resolution for store API calls.
//!
//! Every store API call is addressed as
//! `{api_url}/stores/{store_hash}/{version}{logical_path}`. Legacy versions
//! (anything but `v3`) select their response format with a file extension:
//! `.xml` for XML, nothing for JSON. The extension goes in front of the query
//! string so `/products?limit=5` becomes `/products.xml?limit=5`.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{ApiVersion, ResponseFormat};
//! use bigcommerce_api::rest::build_path;
//!
//! assert_eq!(
//!     build_path(&ApiVersion::V2, "abc123", "/products", ResponseFormat::Xml),
//!     "/stores/abc123/v2/products.xml"
//! );
//! assert_eq!(
//!     build_path(&ApiVersion::V2, "abc123", "/products?limit=5", ResponseFormat::Json),
//!     "/stores/abc123/v2/products?limit=5"
//! );
//! assert_eq!(
//!     build_path(&ApiVersion::V3, "abc123", "/catalog/products", ResponseFormat::Xml),
//!     "/stores/abc123/v3/catalog/products"
//! );
//! ```

use std::collections::HashMap;

use crate::config::{ApiVersion, BigCommerceConfig, ResponseFormat};
use crate::rest::errors::ApiError;

/// Header carrying the app's client ID.
pub const AUTH_CLIENT_HEADER: &str = "X-Auth-Client";

/// Header carrying the store access token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// A path and header set ready to hand to a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// Absolute path below the API host, including any query string.
    pub path: String,
    /// Headers to send with the request.
    pub headers: HashMap<String, String>,
}

/// Builds the full store API path for `logical_path`.
///
/// A missing leading `/` on `logical_path` is added.
#[must_use]
pub fn build_path(
    version: &ApiVersion,
    store_hash: &str,
    logical_path: &str,
    format: ResponseFormat,
) -> String {
    let separator = if logical_path.starts_with('/') { "" } else { "/" };
    let mut path = format!("/stores/{store_hash}/{version}{separator}{logical_path}");

    if version.is_v3() {
        return path;
    }

    let extension = format.path_extension();
    if !extension.is_empty() {
        match path.find('?') {
            Some(index) => path.insert_str(index, extension),
            None => path.push_str(extension),
        }
    }
    path
}

/// Path of the platform clock endpoint, which only exists on `v2`.
#[must_use]
pub fn time_path(store_hash: &str) -> String {
    build_path(&ApiVersion::V2, store_hash, "/time", ResponseFormat::Json)
}

/// Resolves an authenticated call against the configured store.
///
/// Headers are `Accept` (from the configured response format), `X-Auth-Client` and
/// `X-Auth-Token`, followed by the configured extra headers. Extra headers
/// replace defaults with the same name, ignoring case.
///
/// # Errors
///
/// Returns [`ApiError::MissingCredentials`] if the access token or store hash
/// is not configured.
pub fn resolve(
    config: &BigCommerceConfig,
    version: &ApiVersion,
    logical_path: &str,
) -> Result<ResolvedRequest, ApiError> {
    let access_token = config
        .access_token()
        .ok_or(ApiError::MissingCredentials {
            field: "access_token",
        })?;
    let store_hash = config
        .store_hash()
        .ok_or(ApiError::MissingCredentials { field: "store_hash" })?;

    let format = config.response_type();
    let mut headers = HashMap::new();
    headers.insert("Accept".to_string(), format.accept_header().to_string());
    headers.insert(
        AUTH_CLIENT_HEADER.to_string(),
        config.client_id().as_ref().to_string(),
    );
    headers.insert(
        AUTH_TOKEN_HEADER.to_string(),
        access_token.as_ref().to_string(),
    );
    merge_headers(&mut headers, config.headers());

    let path = build_path(version, store_hash.as_ref(), logical_path, format);
    tracing::debug!(path = %path, "Resolved API path");

    Ok(ResolvedRequest { path, headers })
}

fn merge_headers(headers: &mut HashMap<String, String>, overrides: &HashMap<String, String>) {
    for (key, value) in overrides {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
        headers.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ClientId, ClientSecret, StoreHash};

    fn config() -> BigCommerceConfig {
        BigCommerceConfig::builder()
            .client_id(ClientId::new("client-1").unwrap())
            .secret(ClientSecret::new("secret").unwrap())
            .access_token(AccessToken::new("token-1").unwrap())
            .store_hash(StoreHash::new("abc123").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_path_v2_xml_appends_extension() {
        assert_eq!(
            build_path(&ApiVersion::V2, "abc123", "/products", ResponseFormat::Xml),
            "/stores/abc123/v2/products.xml"
        );
    }

    #[test]
    fn test_build_path_inserts_extension_before_query() {
        assert_eq!(
            build_path(&ApiVersion::V2, "abc123", "/products?limit=5&page=2", ResponseFormat::Xml),
            "/stores/abc123/v2/products.xml?limit=5&page=2"
        );
    }

    #[test]
    fn test_build_path_json_has_no_extension() {
        assert_eq!(
            build_path(&ApiVersion::V2, "abc123", "/products?limit=5", ResponseFormat::Json),
            "/stores/abc123/v2/products?limit=5"
        );
    }

    #[test]
    fn test_build_path_v3_is_unmodified() {
        assert_eq!(
            build_path(&ApiVersion::V3, "abc123", "/catalog/products", ResponseFormat::Json),
            "/stores/abc123/v3/catalog/products"
        );
        assert_eq!(
            build_path(&ApiVersion::V3, "abc123", "/catalog/products", ResponseFormat::Xml),
            "/stores/abc123/v3/catalog/products"
        );
    }

    #[test]
    fn test_build_path_adds_leading_slash() {
        assert_eq!(
            build_path(&ApiVersion::V2, "abc123", "orders", ResponseFormat::Json),
            "/stores/abc123/v2/orders"
        );
    }

    #[test]
    fn test_time_path_is_always_v2() {
        assert_eq!(time_path("abc123"), "/stores/abc123/v2/time");
    }

    #[test]
    fn test_resolve_sets_auth_headers() {
        let resolved = resolve(&config(), &ApiVersion::V3, "/catalog/products").unwrap();

        assert_eq!(resolved.path, "/stores/abc123/v3/catalog/products");
        assert_eq!(resolved.headers["Accept"], "application/json");
        assert_eq!(resolved.headers[AUTH_CLIENT_HEADER], "client-1");
        assert_eq!(resolved.headers[AUTH_TOKEN_HEADER], "token-1");
    }

    #[test]
    fn test_resolve_applies_header_overrides() {
        let config = BigCommerceConfig::builder()
            .client_id(ClientId::new("client-1").unwrap())
            .secret(ClientSecret::new("secret").unwrap())
            .access_token(AccessToken::new("token-1").unwrap())
            .store_hash(StoreHash::new("abc123").unwrap())
            .header("accept", "application/vnd+json")
            .header("X-Custom", "1")
            .build()
            .unwrap();

        let resolved = resolve(&config, &ApiVersion::V2, "/orders").unwrap();
        assert_eq!(resolved.headers.get("Accept"), None);
        assert_eq!(resolved.headers["accept"], "application/vnd+json");
        assert_eq!(resolved.headers["X-Custom"], "1");
    }

    #[test]
    fn test_resolve_requires_access_token() {
        let config = BigCommerceConfig::builder()
            .client_id(ClientId::new("client-1").unwrap())
            .secret(ClientSecret::new("secret").unwrap())
            .store_hash(StoreHash::new("abc123").unwrap())
            .build()
            .unwrap();

        assert!(matches!(
            resolve(&config, &ApiVersion::V2, "/orders"),
            Err(ApiError::MissingCredentials { field: "access_token" })
        ));
    }

    #[test]
    fn test_resolve_requires_store_hash() {
        let config = BigCommerceConfig::builder()
            .client_id(ClientId::new("client-1").unwrap())
            .secret(ClientSecret::new("secret").unwrap())
            .access_token(AccessToken::new("token-1").unwrap())
            .build()
            .unwrap();

        assert!(matches!(
            resolve(&config, &ApiVersion::V2, "/orders"),
            Err(ApiError::MissingCredentials { field: "store_hash" })
        ));
    }
}
