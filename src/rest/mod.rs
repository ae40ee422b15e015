//! Store API addressing.
//!
//! This module turns a logical path such as `/catalog/products` into the
//! versioned, authenticated request the platform expects. The HTTP verbs on
//! [`BigCommerce`](crate::BigCommerce) are thin wrappers around [`resolve`].
//!
//! # Overview
//!
//! - [`build_path`]: `/stores/{hash}/{version}{path}[.ext]`
//! - [`resolve`]: path plus `Accept`, `X-Auth-Client` and `X-Auth-Token`
//! - [`time_path`]: the `v2` clock endpoint
//! - [`ApiError`]: resolution and transport failures

mod errors;
mod path;

pub use errors::ApiError;
pub use path::{build_path, resolve, time_path, ResolvedRequest, AUTH_CLIENT_HEADER, AUTH_TOKEN_HEADER};
