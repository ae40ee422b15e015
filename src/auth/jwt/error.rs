//! Error types for token issuance and verification.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

use crate::clients::TransportError;

/// Errors that can occur while issuing or verifying JWTs.
///
/// Verification is all-or-nothing: on any of these errors no claims are
/// returned.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::auth::jwt::TokenError;
///
/// let error = TokenError::InvalidArgument {
///     reason: "request_ip '999.999.999.999' is not a valid IP address".to_string(),
/// };
/// assert!(error.to_string().contains("999.999.999.999"));
/// ```
#[derive(Debug, Error)]
pub enum TokenError {
    /// A caller-supplied value was rejected before signing.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },

    /// The token is not a structurally valid JWT.
    #[error("Malformed token: {reason}")]
    MalformedToken {
        /// Why the token could not be decoded.
        reason: String,
    },

    /// The signature does not verify, or the token uses a different algorithm.
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// The `aud` claim does not match the app's client ID.
    #[error("Token audience does not match the client ID")]
    InvalidAudience,

    /// The `exp` claim is in the past.
    #[error("Token has expired")]
    TokenExpired,

    /// A credential required to build the claims is not configured.
    #[error("Missing credentials: '{field}' must be configured to issue this token")]
    MissingCredentials {
        /// The name of the missing configuration field.
        field: &'static str,
    },

    /// The token could not be signed.
    #[error("Failed to sign token: {0}")]
    Signing(#[source] JwtError),

    /// Fetching the platform clock failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl TokenError {
    /// Maps a `jsonwebtoken` decode failure onto the verification taxonomy.
    pub(crate) fn from_decode_error(error: &JwtError) -> Self {
        match error.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            ErrorKind::InvalidAudience => Self::InvalidAudience,
            ErrorKind::MissingRequiredClaim(claim) if claim == "aud" => Self::InvalidAudience,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
                Self::InvalidSignature
            }
            _ => Self::MalformedToken {
                reason: error.to_string(),
            },
        }
    }
}

// Verify TokenError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenError>();
};
