//! Opening by trial decryption
//!
//! The stored identity keys are not used to pick an entry. Every entry is
//! tried in order: derive the wrap key as if the entry were ours, and let the
//! AEAD tag decide. The first entry whose wrapped key and body both verify
//! wins. Cost is O(N) key agreements for N recipients.

use multiseal_crypto::{PrivateKey, PublicKey, SymmetricKey, aead, derive_wrap_key, shared_secret};
use zeroize::Zeroizing;

use crate::{envelope::Envelope, error::EnvelopeError};

/// Recover the plaintext of `envelope` with `private_key`.
///
/// # Errors
///
/// - `NotFound`: no entry's wrapped key authenticated under this key
/// - `AuthenticationFailure`: an entry unwrapped, but the body did not verify
///   under the recovered key (corrupt or spliced envelope)
/// - `InvalidRecipient`: an entry's ephemeral key is malformed or low-order;
///   the scan stops there
pub fn open(
    envelope: &Envelope,
    private_key: &PrivateKey,
) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
    let own_public = private_key.public_key();
    let mut unverified = 0usize;

    for (index, entry) in envelope.recipients.iter().enumerate() {
        let ephemeral = PublicKey::try_from(entry.ephemeral_public_key.as_slice())
            .map_err(|e| EnvelopeError::in_recipient(index, e))?;
        let shared = shared_secret(private_key, &ephemeral)
            .map_err(|e| EnvelopeError::in_recipient(index, e))?;
        let wrap_key = derive_wrap_key(&shared, &ephemeral, &own_public);

        let body_key = match aead::decrypt(&wrap_key, &entry.wrapped_key) {
            Ok(bytes) => bytes,
            Err(e) if e.is_authentication_failure() => {
                tracing::trace!(index, "entry does not belong to this key");
                continue;
            },
            Err(e) => return Err(e.into()),
        };

        let Ok(body_key) = SymmetricKey::try_from(body_key.as_slice()) else {
            tracing::trace!(index, len = body_key.len(), "unwrapped body key has wrong length");
            unverified += 1;
            continue;
        };

        match aead::decrypt(&body_key, &envelope.body) {
            Ok(plaintext) => {
                tracing::debug!(index, recipients = envelope.recipients.len(), "opened envelope");
                return Ok(plaintext);
            },
            Err(e) if e.is_authentication_failure() => {
                tracing::trace!(index, "body did not verify under unwrapped key");
                unverified += 1;
            },
            Err(e) => return Err(e.into()),
        }
    }

    if unverified > 0 {
        tracing::debug!(entries = unverified, "envelope failed authentication");
        return Err(EnvelopeError::AuthenticationFailure { entries: unverified });
    }

    tracing::debug!(
        candidates = envelope.recipients.len(),
        listed = envelope.lists_recipient(&own_public),
        "no recipient entry matches key"
    );
    Err(EnvelopeError::NotFound { candidates: envelope.recipients.len() })
}
