//! Envelope data model.
//!
//! An envelope is produced whole by sealing and never modified by this
//! crate afterwards: update and append build a new envelope with fresh
//! randomness. Older envelopes remain openable by anyone holding them.

use multiseal_crypto::PublicKey;
use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;

/// Envelope format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Version {
    /// X25519 + HKDF-SHA256 key wrapping, `XChaCha20-Poly1305` body
    #[default]
    V1,
}

impl Version {
    /// Version written by [`crate::seal_with`].
    pub const CURRENT: Self = Self::V1;
}

/// One recipient's copy of the body key.
///
/// Keys are stored in their fixed-width 32-byte form. They are kept as raw
/// bytes because envelopes can come from an external decoder, so they are
/// validated when used rather than trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// The recipient's long-term public key, exactly as given at seal time.
    pub public_key: Vec<u8>,

    /// Ephemeral public key generated for this entry only.
    pub ephemeral_public_key: Vec<u8>,

    /// Body key encrypted under the wrap key (nonce, ciphertext, tag).
    pub wrapped_key: Vec<u8>,
}

/// A sealed payload and the recipient entries that can open it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Format version.
    pub version: Version,

    /// Recipient entries in the order the keys were given at seal time.
    pub recipients: Vec<Recipient>,

    /// Plaintext encrypted under the body key (nonce, ciphertext, tag).
    pub body: Vec<u8>,
}

impl Envelope {
    /// Assemble an envelope from its parts.
    pub fn new(version: Version, recipients: Vec<Recipient>, body: Vec<u8>) -> Self {
        Self { version, recipients, body }
    }

    /// Decode every recipient identity key, in entry order.
    ///
    /// # Errors
    ///
    /// - `InvalidRecipient`: the first entry whose stored key is malformed.
    ///   Entries are never skipped.
    pub fn recipient_keys(&self) -> Result<Vec<PublicKey>, EnvelopeError> {
        self.recipients
            .iter()
            .enumerate()
            .map(|(index, recipient)| {
                PublicKey::try_from(recipient.public_key.as_slice())
                    .map_err(|e| EnvelopeError::in_recipient(index, e))
            })
            .collect()
    }

    /// Whether `key` is listed as a recipient (exact byte equality).
    ///
    /// This only inspects the stored identity field; it proves nothing about
    /// whether the key can actually open the envelope.
    pub fn lists_recipient(&self, key: &PublicKey) -> bool {
        self.recipients.iter().any(|r| r.public_key.as_slice() == key.as_bytes().as_slice())
    }
}

#[cfg(test)]
mod tests {
    use multiseal_crypto::PrivateKey;

    use super::*;

    fn recipient(public_key: Vec<u8>) -> Recipient {
        Recipient { public_key, ephemeral_public_key: vec![0xEE; 32], wrapped_key: vec![1, 2, 3] }
    }

    #[test]
    fn recipient_keys_in_entry_order() {
        let a = PrivateKey::from_bytes([1; 32]).public_key();
        let b = PrivateKey::from_bytes([2; 32]).public_key();
        let envelope =
            Envelope::new(Version::V1, vec![recipient(b.to_vec()), recipient(a.to_vec())], vec![]);

        assert_eq!(envelope.recipient_keys().unwrap(), vec![b, a]);
    }

    #[test]
    fn malformed_identity_is_reported_not_skipped() {
        let a = PrivateKey::from_bytes([1; 32]).public_key();
        let envelope =
            Envelope::new(Version::V1, vec![recipient(a.to_vec()), recipient(vec![9; 31])], vec![]);

        assert!(matches!(
            envelope.recipient_keys(),
            Err(EnvelopeError::InvalidRecipient { index: 1, .. })
        ));
    }

    #[test]
    fn lists_recipient_uses_exact_bytes() {
        let a = PrivateKey::from_bytes([1; 32]).public_key();
        let b = PrivateKey::from_bytes([2; 32]).public_key();
        let mut prefix = a.to_vec();
        prefix.truncate(16);
        let envelope = Envelope::new(Version::V1, vec![recipient(prefix)], vec![]);

        assert!(!envelope.lists_recipient(&a));
        assert!(!envelope.lists_recipient(&b));

        let envelope = Envelope::new(Version::V1, vec![recipient(a.to_vec())], vec![]);
        assert!(envelope.lists_recipient(&a));
    }

    #[test]
    fn envelope_round_trip_cbor() {
        let original = Envelope::new(
            Version::CURRENT,
            vec![recipient(vec![0xAB; 32]), recipient(vec![0xCD; 32])],
            vec![1, 2, 3, 4, 5, 6, 7, 8],
        );

        let mut encoded = Vec::new();
        ciborium::ser::into_writer(&original, &mut encoded).unwrap();

        let decoded: Envelope = ciborium::de::from_reader(&encoded[..]).unwrap();

        assert_eq!(original, decoded);
    }
}
