//! Verification of legacy signed payloads.
//!
//! Before JWTs, BigCommerce delivered the app load, uninstall and remove-user
//! callbacks as a `signed_payload` query parameter of the form
//! `base64(json).base64(hex_hmac_sha256(json, client_secret))`. This module
//! verifies such payloads and returns the decoded JSON.
//!
//! The JWT path lives in [`crate::auth::jwt`]; this module has no dependency on
//! it so it can be retired on its own once no callback uses it.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::auth::signed_payload::{sign_payload, verify_signed_payload};
//!
//! let payload = sign_payload(r#"{"store_hash":"abc123"}"#, "my-secret");
//! let data = verify_signed_payload(&payload, "my-secret").unwrap();
//! assert_eq!(data["store_hash"], "abc123");
//! ```

use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use thiserror::Error;

use crate::auth::hmac::{compute_signature, constant_time_compare};

/// Decoder that accepts both padded and unpadded segments.
const SEGMENT_DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors returned when a signed payload fails verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignedPayloadError {
    /// No payload was supplied.
    #[error("The signed request is required to verify the call.")]
    MissingPayload,

    /// The payload does not have a data and a signature segment.
    #[error("The signed request will come in two parts separated by a '.' (full stop); this signed request contains less than 2 parts.")]
    MalformedInput,

    /// The data segment could not be decoded or is not JSON.
    #[error("The signed request payload is malformed: {reason}")]
    MalformedPayload {
        /// What was wrong with the data segment.
        reason: String,
    },

    /// The signature does not match the data.
    #[error("Signature is invalid")]
    InvalidSignature,
}

/// Verifies a signed payload and returns its decoded JSON body.
///
/// # Errors
///
/// - [`SignedPayloadError::MissingPayload`] if `signed_payload` is empty
/// - [`SignedPayloadError::MalformedInput`] if it has fewer than two `.`-separated parts
/// - [`SignedPayloadError::MalformedPayload`] if the data segment is not base64
///   UTF-8 text, or is not JSON
/// - [`SignedPayloadError::InvalidSignature`] if the signature segment does not
///   decode to the HMAC of the data
pub fn verify_signed_payload(
    signed_payload: &str,
    secret: &str,
) -> Result<serde_json::Value, SignedPayloadError> {
    if signed_payload.is_empty() {
        return Err(SignedPayloadError::MissingPayload);
    }

    let mut parts = signed_payload.split('.');
    let (Some(encoded_data), Some(encoded_signature)) = (parts.next(), parts.next()) else {
        return Err(SignedPayloadError::MalformedInput);
    };

    let data = SEGMENT_DECODER
        .decode(encoded_data)
        .map_err(|e| SignedPayloadError::MalformedPayload {
            reason: format!("data segment is not base64: {e}"),
        })?;
    let data = String::from_utf8(data).map_err(|_| SignedPayloadError::MalformedPayload {
        reason: "data segment is not UTF-8".to_string(),
    })?;

    // An undecodable signature can never match, so it is reported as a mismatch.
    let signature = SEGMENT_DECODER
        .decode(encoded_signature)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or(SignedPayloadError::InvalidSignature)?;

    let expected = compute_signature(data.as_bytes(), secret);
    if !constant_time_compare(&expected, &signature) {
        tracing::warn!("Rejected signed payload with an invalid signature");
        return Err(SignedPayloadError::InvalidSignature);
    }

    serde_json::from_str(&data).map_err(|e| SignedPayloadError::MalformedPayload {
        reason: e.to_string(),
    })
}

/// Produces a signed payload for `json` in the platform's format.
///
/// Useful for tests and local tooling that need to simulate a callback.
#[must_use]
pub fn sign_payload(json: &str, secret: &str) -> String {
    let signature = compute_signature(json.as_bytes(), secret);
    format!(
        "{}.{}",
        STANDARD.encode(json.as_bytes()),
        STANDARD.encode(signature.as_bytes())
    )
}

// Verify SignedPayloadError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SignedPayloadError>();
};
