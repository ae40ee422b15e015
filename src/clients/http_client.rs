//! The request seam and its default `reqwest` implementation.
//!
//! Everything that talks to the network goes through [`Transport`]. The SDK
//! resolves paths and headers itself and hands the transport a complete
//! [`ApiRequest`]; swapping the transport (for a proxy-aware client, a mock,
//! or a recording double in tests) changes nothing else.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::{MaxRetriesExceededError, ResponseError, TransportError};
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::{ApiResponse, ResponseBody};

/// Wait used when a 429 response carries no reset header, in milliseconds.
pub const DEFAULT_RETRY_WAIT_MS: u64 = 1_000;

/// Default number of attempts for a rate-limited request.
pub const DEFAULT_MAX_TRIES: u32 = 5;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends resolved requests.
///
/// Implementations return the response for 2xx statuses and a
/// [`TransportError`] for everything else. Rate-limit handling belongs to the
/// transport: a 429 either fails with [`TransportError::RateLimited`] when
/// [`ApiRequest::fail_on_limit_reached`] is set, or is retried.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::clients::{ApiRequest, ApiResponse, ResponseBody, Transport, TransportError};
/// use std::collections::HashMap;
///
/// struct Canned;
///
/// impl Transport for Canned {
///     async fn run(&self, _request: ApiRequest) -> Result<ApiResponse, TransportError> {
///         Ok(ApiResponse::new(200, HashMap::new(), ResponseBody::Json(serde_json::json!({}))))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the decoded response.
    fn run(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn run(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send {
        self.as_ref().run(request)
    }
}

/// The default [`Transport`], backed by `reqwest` with rustls.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync`; the inner client pools connections
/// and is cheap to clone.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::clients::ReqwestTransport;
///
/// let transport = ReqwestTransport::new().max_tries(3);
/// ```
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    max_tries: u32,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    /// Creates a transport with its own `reqwest` client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("BigCommerce API Library v{SDK_VERSION} | Rust"))
            .build()
            .expect("Failed to create HTTP client");
        Self::with_client(client)
    }

    /// Creates a transport around an existing client, e.g. one configured
    /// with a proxy or custom timeouts.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            max_tries: DEFAULT_MAX_TRIES,
        }
    }

    /// Sets how many attempts a rate-limited request gets (minimum 1).
    #[must_use]
    pub fn max_tries(mut self, tries: u32) -> Self {
        self.max_tries = tries.max(1);
        self
    }

    async fn send_once(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url();
        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let res = req_builder.send().await?;
        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let text = res.text().await?;

        let body = if Self::is_xml(&headers) {
            ResponseBody::Xml(text)
        } else if text.trim().is_empty() {
            ResponseBody::Json(serde_json::json!({}))
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => ResponseBody::Json(value),
                // Error bodies are surfaced verbatim below, so keep the text.
                Err(_) if !(200..=299).contains(&code) => ResponseBody::Xml(text),
                Err(e) => {
                    return Err(TransportError::Decode {
                        reason: e.to_string(),
                    })
                }
            }
        };

        Ok(ApiResponse::new(code, headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn is_xml(headers: &HashMap<String, Vec<String>>) -> bool {
        headers
            .get("content-type")
            .and_then(|values| values.first())
            .is_some_and(|value| value.contains("xml"))
    }

    fn body_text(body: &ResponseBody) -> String {
        match body {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Xml(text) => text.clone(),
        }
    }

    fn retry_wait_ms(response: &ApiResponse) -> u64 {
        response
            .rate_limit
            .and_then(|info| info.time_reset_ms)
            .unwrap_or(DEFAULT_RETRY_WAIT_MS)
    }
}

impl Transport for ReqwestTransport {
    async fn run(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        request.verify()?;

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            "Sending request"
        );

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            let response = self.send_once(&request).await?;

            if response.is_ok() {
                return Ok(response);
            }

            if response.code != 429 {
                return Err(ResponseError {
                    code: response.code,
                    message: Self::body_text(&response.body),
                }
                .into());
            }

            let wait_ms = Self::retry_wait_ms(&response);
            if request.fail_on_limit_reached {
                return Err(TransportError::RateLimited {
                    retry_after_ms: wait_ms,
                });
            }

            if tries >= self.max_tries {
                return Err(MaxRetriesExceededError {
                    code: response.code,
                    tries,
                    message: Self::body_text(&response.body),
                }
                .into());
            }

            tracing::warn!(
                path = %request.path,
                wait_ms,
                attempt = tries,
                "Rate limit reached, waiting for the window to reset"
            );
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;
        }
    }
}
