//! Multiseal
//!
//! Seal a payload once so that any one of N X25519 key holders can open it
//! on their own, without any secret shared between recipients.
//!
//! This crate is the public entry point. It checks arguments, draws
//! randomness from the operating system, and delegates to
//! [`multiseal_core`]. Callers that need to control randomness (tests,
//! simulations) can use the `*_with` functions in the core crate directly.
//!
//! ```no_run
//! # fn main() -> Result<(), multiseal::EnvelopeError> {
//! let (alice_public, alice_private) = multiseal::generate_keys()?;
//! let (bob_public, bob_private) = multiseal::generate_keys()?;
//!
//! let envelope = multiseal::seal(b"hello", &[alice_public, bob_public])?;
//!
//! assert_eq!(multiseal::open(&envelope, &alice_private)?.as_slice(), b"hello");
//! assert_eq!(multiseal::open(&envelope, &bob_private)?.as_slice(), b"hello");
//! # Ok(())
//! # }
//! ```
//!
//! A missing envelope or empty private key cannot be expressed with these
//! types; decoding keys from bytes goes through `TryFrom<&[u8]>` and reports
//! wrong lengths there.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub use multiseal_core::{Envelope, EnvelopeError, Recipient, Version};
pub use multiseal_crypto::{
    CryptoError, KeyPair, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, PrivateKey, PublicKey,
};
use multiseal_crypto::OsRandom;
use zeroize::Zeroizing;

/// Generate a new X25519 key pair as `(public, private)`.
///
/// # Errors
///
/// - `EntropyFailure`: the OS random source is unavailable
pub fn generate_keys() -> Result<(PublicKey, PrivateKey), EnvelopeError> {
    Ok(KeyPair::generate(&mut OsRandom)?.into_parts())
}

/// Seal `plaintext` so that each key in `recipients` can open it.
///
/// # Errors
///
/// - `PreconditionViolation`: `plaintext` or `recipients` is empty
/// - `InvalidKey`: a recipient key is a low-order point
/// - `EntropyFailure`: the OS random source is unavailable
pub fn seal(plaintext: &[u8], recipients: &[PublicKey]) -> Result<Envelope, EnvelopeError> {
    require(!plaintext.is_empty(), "plaintext must not be empty")?;
    require(!recipients.is_empty(), "one or more public keys must be specified")?;

    multiseal_core::seal_with(&mut OsRandom, plaintext, recipients)
}

/// Open `envelope` with `private_key`.
///
/// # Errors
///
/// - `NotFound`: `private_key` is not one of the recipients
/// - `AuthenticationFailure`: the envelope was modified after sealing
/// - `InvalidRecipient`: an entry's ephemeral key is malformed or low-order
pub fn open(
    envelope: &Envelope,
    private_key: &PrivateKey,
) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
    multiseal_core::open(envelope, private_key)
}

/// Replace the sealed plaintext, keeping every recipient.
///
/// `private_key` must be able to open `envelope`. Returns a new envelope;
/// the input is unchanged and stays openable.
///
/// # Errors
///
/// - `PreconditionViolation`: `new_plaintext` is empty
/// - Any error from [`open`]
pub fn update(
    envelope: &Envelope,
    private_key: &PrivateKey,
    new_plaintext: &[u8],
) -> Result<Envelope, EnvelopeError> {
    require(!new_plaintext.is_empty(), "plaintext must not be empty")?;

    multiseal_core::update_with(&mut OsRandom, envelope, private_key, new_plaintext)
}

/// Grant access to more recipients.
///
/// `private_key` must be able to open `envelope`. Keys already present are
/// skipped. Returns a new envelope; the input is unchanged.
///
/// # Errors
///
/// - `PreconditionViolation`: `new_keys` is empty
/// - Any error from [`open`]
pub fn append(
    envelope: &Envelope,
    private_key: &PrivateKey,
    new_keys: &[PublicKey],
) -> Result<Envelope, EnvelopeError> {
    require(!new_keys.is_empty(), "one or more public keys must be specified")?;

    multiseal_core::append_with(&mut OsRandom, envelope, private_key, new_keys)
}

fn require(condition: bool, reason: &'static str) -> Result<(), EnvelopeError> {
    if condition {
        Ok(())
    } else {
        tracing::debug!(reason, "rejected envelope request");
        Err(EnvelopeError::PreconditionViolation { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_rejects_empty_recipients() {
        let result = seal(b"hello", &[]);

        assert!(matches!(result, Err(EnvelopeError::PreconditionViolation { .. })));
    }

    #[test]
    fn seal_rejects_empty_plaintext() {
        let (public, _) = generate_keys().unwrap();

        let result = seal(b"", &[public]);

        assert!(matches!(result, Err(EnvelopeError::PreconditionViolation { .. })));
    }

    #[test]
    fn update_rejects_empty_plaintext() {
        let (public, private) = generate_keys().unwrap();
        let envelope = seal(b"hello", &[public]).unwrap();

        let result = update(&envelope, &private, b"");

        assert!(matches!(result, Err(EnvelopeError::PreconditionViolation { .. })));
    }

    #[test]
    fn append_rejects_empty_key_list() {
        let (public, private) = generate_keys().unwrap();
        let envelope = seal(b"hello", &[public]).unwrap();

        let result = append(&envelope, &private, &[]);

        assert!(matches!(result, Err(EnvelopeError::PreconditionViolation { .. })));
    }

    #[test]
    fn precondition_is_checked_before_authorization() {
        let (public, _) = generate_keys().unwrap();
        let (_, outsider) = generate_keys().unwrap();
        let envelope = seal(b"hello", &[public]).unwrap();

        let result = append(&envelope, &outsider, &[]);

        assert_eq!(
            result.unwrap_err(),
            EnvelopeError::PreconditionViolation {
                reason: "one or more public keys must be specified"
            }
        );
    }

    #[test]
    fn generated_public_matches_private() {
        let (public, private) = generate_keys().unwrap();

        assert_eq!(private.public_key(), public);
    }
}
