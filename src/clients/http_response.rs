//! Response types returned by a [`Transport`](crate::clients::Transport).

use std::collections::HashMap;

/// Rate limit information parsed from the `X-Rate-Limit-*` response headers.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use bigcommerce_api::clients::RateLimitInfo;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-rate-limit-requests-left".to_string(), vec!["12".to_string()]);
/// headers.insert("x-rate-limit-time-reset-ms".to_string(), vec!["3000".to_string()]);
///
/// let info = RateLimitInfo::from_headers(&headers).unwrap();
/// assert_eq!(info.requests_left, Some(12));
/// assert_eq!(info.time_reset_ms, Some(3000));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub requests_left: Option<u64>,
    /// Requests allowed per window.
    pub requests_quota: Option<u64>,
    /// Milliseconds until the window resets.
    pub time_reset_ms: Option<u64>,
    /// Length of the window in milliseconds.
    pub time_window_ms: Option<u64>,
}

impl RateLimitInfo {
    /// Parses the rate limit headers, returning `None` if none are present.
    ///
    /// Header names are expected in lowercase.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .and_then(|value| value.trim().parse::<u64>().ok())
        };

        let info = Self {
            requests_left: read("x-rate-limit-requests-left"),
            requests_quota: read("x-rate-limit-requests-quota"),
            time_reset_ms: read("x-rate-limit-time-reset-ms"),
            time_window_ms: read("x-rate-limit-time-window-ms"),
        };

        (info != Self::default()).then_some(info)
    }
}

/// A decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    /// A JSON document. Empty bodies decode to an empty object.
    Json(serde_json::Value),
    /// Raw XML text, returned when the XML response format is configured.
    Xml(String),
}

impl ResponseBody {
    /// Returns the JSON document, if this is a JSON body.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Xml(_) => None,
        }
    }

    /// Returns the XML text, if this is an XML body.
    #[must_use]
    pub fn as_xml(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Xml(text) => Some(text),
        }
    }
}

/// A response from the store API or the OAuth endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded body.
    pub body: ResponseBody,
    /// Rate limit state reported by the platform, if any.
    pub rate_limit: Option<RateLimitInfo>,
}

impl ApiResponse {
    /// Creates a response, parsing the rate limit headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: ResponseBody) -> Self {
        let rate_limit = RateLimitInfo::from_headers(&headers);
        Self {
            code,
            headers,
            body,
            rate_limit,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub const fn json(&self) -> Option<&serde_json::Value> {
        self.body.as_json()
    }
}
