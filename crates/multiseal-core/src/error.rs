//! Error types for envelope operations
//!
//! Opening distinguishes "this key is not a recipient" ([`NotFound`]) from
//! "a recipient entry unwrapped but the envelope did not verify"
//! ([`AuthenticationFailure`]). Everything else aborts the operation that
//! hit it.
//!
//! [`NotFound`]: EnvelopeError::NotFound
//! [`AuthenticationFailure`]: EnvelopeError::AuthenticationFailure

use multiseal_crypto::CryptoError;
use thiserror::Error;

/// Errors from seal, open, update and append
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Random source unavailable
    #[error("entropy source failed: {reason}")]
    EntropyFailure {
        /// Description reported by the random source
        reason: String,
    },

    /// Malformed or unusable public/private key
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },

    /// A stored recipient key in the envelope failed to decode
    #[error("invalid key in recipient entry {index}: {reason}")]
    InvalidRecipient {
        /// Position of the entry in the envelope
        index: usize,
        /// Why the key was rejected
        reason: String,
    },

    /// A recipient entry unwrapped under this key but the body (or the
    /// unwrapped body key) failed verification
    #[error("envelope failed authentication ({entries} matching entries did not verify)")]
    AuthenticationFailure {
        /// Number of entries that unwrapped but did not verify
        entries: usize,
    },

    /// No recipient entry could be unwrapped with this key
    #[error("no recipient entry matches this key ({candidates} entries tried)")]
    NotFound {
        /// Number of entries scanned
        candidates: usize,
    },

    /// Argument rejected before any cryptographic work
    #[error("precondition violated: {reason}")]
    PreconditionViolation {
        /// Which precondition failed
        reason: &'static str,
    },
}

impl EnvelopeError {
    /// Returns true if this error is fatal (the envelope or environment is
    /// broken).
    ///
    /// `NotFound` only means the key is not a recipient, and precondition
    /// violations are caller mistakes that can be corrected and retried.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::EntropyFailure { .. } => true,
            Self::InvalidKey { .. } => true,
            Self::InvalidRecipient { .. } => true,
            Self::AuthenticationFailure { .. } => true,

            Self::NotFound { .. } => false,
            Self::PreconditionViolation { .. } => false,
        }
    }

    /// Attach the entry index to a key decoding failure.
    pub(crate) fn in_recipient(index: usize, err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidKey { reason } => Self::InvalidRecipient { index, reason },
            CryptoError::InvalidKeyLength { .. } => {
                Self::InvalidRecipient { index, reason: err.to_string() }
            },
            other => other.into(),
        }
    }
}

impl From<CryptoError> for EnvelopeError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::EntropyFailure { reason } => Self::EntropyFailure { reason },
            CryptoError::InvalidKey { reason } => Self::InvalidKey { reason },
            CryptoError::InvalidKeyLength { .. } => Self::InvalidKey { reason: err.to_string() },
            CryptoError::AuthenticationFailed => Self::AuthenticationFailure { entries: 0 },
        }
    }
}
