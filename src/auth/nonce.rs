//! Random nonce generation for token identifiers.
//!
//! Customer login tokens carry a `jti` claim that the platform uses to reject
//! replays, so it must come from a cryptographically secure source. The source
//! is abstracted behind [`NonceSource`] so tests can substitute a
//! deterministic generator.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::auth::nonce::{generate_jti, OsNonceSource};
//!
//! let jti = generate_jti(&OsNonceSource);
//! assert_eq!(jti.len(), 64);
//! ```

use rand::rngs::OsRng;
use rand::RngCore;

use crate::auth::hmac::hex;

/// Number of random bytes in a `jti` (256 bits).
pub const JTI_BYTES: usize = 32;

/// A source of random bytes for nonces.
///
/// Implementations must be safe to share across tasks. Production code uses
/// [`OsNonceSource`]; anything else is for tests.
pub trait NonceSource: Send + Sync {
    /// Fills `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// Operating-system CSPRNG backed nonce source.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Generates a 256-bit random `jti`, hex-encoded.
#[must_use]
pub fn generate_jti(source: &dyn NonceSource) -> String {
    let mut bytes = [0u8; JTI_BYTES];
    source.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
