//! The request seam between the SDK and the network.
//!
//! The SDK never builds HTTP calls inline. Every outbound call is resolved into
//! an [`ApiRequest`] (host, full path, headers, optional JSON body) and handed
//! to a [`Transport`]. The crate ships [`ReqwestTransport`]; any other
//! implementation can be plugged into [`BigCommerce`](crate::BigCommerce).
//!
//! # Overview
//!
//! - [`Transport`]: the async request collaborator
//! - [`ReqwestTransport`]: the default transport
//! - [`ApiRequest`] / [`ApiRequestBuilder`]: a resolved request
//! - [`ApiResponse`] / [`ResponseBody`] / [`RateLimitInfo`]: a decoded response
//! - [`TransportError`]: what a transport can fail with
//!
//! # Rate limits
//!
//! A 429 response is handled by the transport:
//!
//! - with `fail_on_limit_reached`, it fails at once with
//!   [`TransportError::RateLimited`], reporting the reset delay
//! - otherwise it sleeps for `X-Rate-Limit-Time-Reset-Ms` (1 second if the
//!   header is absent) and retries, up to [`DEFAULT_MAX_TRIES`] attempts
//!
//! Other non-2xx responses are returned as [`TransportError::Response`]
//! without retrying.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{InvalidRequestError, MaxRetriesExceededError, ResponseError, TransportError};
pub use http_client::{
    ReqwestTransport, Transport, DEFAULT_MAX_TRIES, DEFAULT_RETRY_WAIT_MS, SDK_VERSION,
};
pub use http_request::{ApiRequest, ApiRequestBuilder, HttpMethod};
pub use http_response::{ApiResponse, RateLimitInfo, ResponseBody};
