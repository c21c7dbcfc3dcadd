//! Error types for cryptographic primitives

use thiserror::Error;

/// Errors from key generation, key agreement and AEAD operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The random source could not produce bytes
    #[error("entropy source failed: {reason}")]
    EntropyFailure {
        /// Description reported by the random source
        reason: String,
    },

    /// Public key is not usable for key agreement (identity or low-order
    /// point)
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },

    /// Key material has the wrong length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length
        expected: usize,
        /// Actual key length
        actual: usize,
    },

    /// AEAD tag mismatch or malformed ciphertext
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl CryptoError {
    /// Returns true if this error means "this key does not open that
    /// ciphertext" rather than a broken input or environment.
    ///
    /// Trial decryption swallows these and moves on to the next candidate.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }
}
