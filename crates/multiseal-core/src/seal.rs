//! Sealing: encrypt once, wrap the body key for every recipient

use multiseal_crypto::{
    KeyPair, PublicKey, RandomSource, SymmetricKey, aead, derive_wrap_key, shared_secret,
};

use crate::{
    envelope::{Envelope, Recipient, Version},
    error::EnvelopeError,
};

/// Seal `plaintext` for every key in `recipients`.
///
/// A random body key encrypts the plaintext; each recipient gets the body key
/// wrapped under a key agreed with a fresh ephemeral key pair. Entries appear
/// in the same order as `recipients`, duplicates included.
///
/// All-or-nothing: an entropy failure or an invalid recipient key aborts the
/// whole seal and no envelope is returned.
///
/// An empty recipient list is not rejected here; the result simply cannot be
/// opened by anyone.
pub fn seal_with<R: RandomSource>(
    rng: &mut R,
    plaintext: &[u8],
    recipients: &[PublicKey],
) -> Result<Envelope, EnvelopeError> {
    let body_key = SymmetricKey::generate(rng)?;

    let mut entries = Vec::with_capacity(recipients.len());
    for recipient in recipients {
        entries.push(wrap_body_key(rng, &body_key, recipient)?);
    }

    let body = aead::encrypt(rng, &body_key, plaintext)?;

    tracing::debug!(recipients = entries.len(), body_len = body.len(), "sealed envelope");

    Ok(Envelope::new(Version::CURRENT, entries, body))
}

/// Build one recipient entry with its own ephemeral key pair.
///
/// The ephemeral private key is dropped (and zeroized) on return.
fn wrap_body_key<R: RandomSource>(
    rng: &mut R,
    body_key: &SymmetricKey,
    recipient: &PublicKey,
) -> Result<Recipient, EnvelopeError> {
    let ephemeral = KeyPair::generate(rng)?;

    let shared = shared_secret(ephemeral.private_key(), recipient)?;
    let wrap_key = derive_wrap_key(&shared, ephemeral.public_key(), recipient);
    let wrapped_key = aead::encrypt(rng, &wrap_key, body_key.as_bytes())?;

    Ok(Recipient {
        public_key: recipient.to_vec(),
        ephemeral_public_key: ephemeral.public_key().to_vec(),
        wrapped_key,
    })
}
