//! HMAC primitives for signed payload verification.
//!
//! This module provides functions for computing HMAC-SHA256 signatures and
//! comparing them without leaking timing information.
//!
//! # Security
//!
//! All signature comparisons use constant-time comparison to prevent timing
//! attacks. Inputs of unequal length are rejected before the comparison runs;
//! only the length itself is observable.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::auth::hmac::{compute_signature, constant_time_compare};
//!
//! let signature = compute_signature(br#"{"store_hash":"abc123"}"#, "my-secret");
//! assert_eq!(signature.len(), 64);
//! assert!(constant_time_compare(&signature, &signature.clone()));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes an HMAC-SHA256 signature for the given message.
///
/// The signature is returned as a lowercase hexadecimal string, the format
/// BigCommerce places (base64-wrapped) in the second segment of a signed payload.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::auth::hmac::compute_signature;
///
/// let sig = compute_signature(b"message", "key");
/// assert_eq!(sig, "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a");
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Performs constant-time comparison of two strings.
///
/// Strings of different lengths compare unequal immediately; equal-length
/// strings are compared with [`subtle::ConstantTimeEq`].
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.len() != b_bytes.len() {
        return false;
    }

    a_bytes.ct_eq(b_bytes).into()
}

// Internal hex encoding since we don't want to add another dependency
pub(crate) mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_signature_produces_lowercase_hex() {
        let sig = compute_signature(b"test", "secret");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(sig.chars().all(|c| !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_compute_signature_matches_known_value() {
        // HMAC-SHA256("message", "key")
        let sig = compute_signature(b"message", "key");
        assert_eq!(
            sig,
            "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
        );
    }

    #[test]
    fn test_compute_signature_depends_on_secret() {
        assert_ne!(
            compute_signature(b"payload", "secret-a"),
            compute_signature(b"payload", "secret-b")
        );
    }

    #[test]
    fn test_constant_time_compare_equal_strings() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_constant_time_compare_different_strings() {
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("ABC", "abc"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "longer string"));
        assert!(!constant_time_compare("a", ""));
        assert!(!constant_time_compare("abc", "abcd"));
    }

    #[test]
    fn test_hex_encode() {
        assert_eq!(hex::encode([0x00_u8, 0x0f, 0xa5, 0xff]), "000fa5ff");
        assert_eq!(hex::encode(b""), "");
    }
}
