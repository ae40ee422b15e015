//! Request types handed to a [`Transport`](crate::clients::Transport).
//!
//! An [`ApiRequest`] is fully resolved: it names the host, the complete path
//! and every header. Transports only have to send it.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidRequestError;
use crate::config::HostUrl;

/// HTTP methods used by the store API and the OAuth endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns whether requests with this method must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A fully resolved outbound request.
///
/// Use [`ApiRequest::builder`] to construct one.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::HostUrl;
/// use bigcommerce_api::clients::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// let host = HostUrl::new("https://api.bigcommerce.com").unwrap();
///
/// let request = ApiRequest::builder(host, HttpMethod::Post, "/stores/abc123/v3/catalog/products")
///     .header("Accept", "application/json")
///     .body(json!({"name": "Shirt"}))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.url(), "https://api.bigcommerce.com/stores/abc123/v3/catalog/products");
/// ```
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// The host the request is sent to.
    pub host: HostUrl,
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute path, including any query string.
    pub path: String,
    /// Headers to send.
    pub headers: HashMap<String, String>,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Fail on a 429 instead of waiting for the window to reset.
    pub fail_on_limit_reached: bool,
}

impl ApiRequest {
    /// Creates a new builder for constructing an `ApiRequest`.
    #[must_use]
    pub fn builder(host: HostUrl, method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(host, method, path)
    }

    /// Returns the full URL of the request.
    #[must_use]
    pub fn url(&self) -> String {
        self.host.join(&self.path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if:
    /// - `path` is empty
    /// - `http_method` is `Post` or `Put` but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        if self.path.is_empty() {
            return Err(InvalidRequestError::MissingPath);
        }

        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`ApiRequest`] instances.
#[derive(Debug)]
pub struct ApiRequestBuilder {
    host: HostUrl,
    http_method: HttpMethod,
    path: String,
    headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
    fail_on_limit_reached: bool,
}

impl ApiRequestBuilder {
    fn new(host: HostUrl, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            host,
            http_method: method,
            path: path.into(),
            headers: HashMap::new(),
            body: None,
            fail_on_limit_reached: false,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body if one is given.
    #[must_use]
    pub fn maybe_body(mut self, body: Option<serde_json::Value>) -> Self {
        self.body = body;
        self
    }

    /// Sets all headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets whether a 429 fails immediately.
    #[must_use]
    pub const fn fail_on_limit_reached(mut self, fail: bool) -> Self {
        self.fail_on_limit_reached = fail;
        self
    }

    /// Builds the [`ApiRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if the request fails validation.
    pub fn build(self) -> Result<ApiRequest, InvalidRequestError> {
        let request = ApiRequest {
            host: self.host,
            http_method: self.http_method,
            path: self.path,
            headers: self.headers,
            body: self.body,
            fail_on_limit_reached: self.fail_on_limit_reached,
        };
        request.verify()?;
        Ok(request)
    }
}
