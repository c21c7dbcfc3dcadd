//! Update and append: open for authorization, then seal a brand-new envelope
//!
//! Neither operation touches the input envelope. The result shares no
//! randomness with it (new body key, new ephemeral keys, new nonces), and the
//! old envelope stays openable by anyone who kept it.

use multiseal_crypto::{PrivateKey, PublicKey, RandomSource};

use crate::{envelope::Envelope, error::EnvelopeError, open::open, seal::seal_with};

/// Replace the plaintext, keeping the recipient set.
///
/// `private_key` must open `envelope`; the old plaintext is discarded. The
/// new envelope lists the same identity keys in the same order.
///
/// # Errors
///
/// - Any error from [`open`], unchanged
/// - `InvalidRecipient`: a stored identity key does not decode
pub fn update_with<R: RandomSource>(
    rng: &mut R,
    envelope: &Envelope,
    private_key: &PrivateKey,
    new_plaintext: &[u8],
) -> Result<Envelope, EnvelopeError> {
    // Authorization only
    open(envelope, private_key)?;

    let recipients = envelope.recipient_keys()?;

    tracing::debug!(recipients = recipients.len(), "updating envelope");
    seal_with(rng, new_plaintext, &recipients)
}

/// Add recipients, keeping the plaintext.
///
/// `private_key` must open `envelope`; the recovered plaintext is sealed
/// again for the existing identity keys followed by every key in `new_keys`
/// not already present. Presence is exact byte equality, so appending a key
/// twice is a no-op the second time.
///
/// # Errors
///
/// - Any error from [`open`], unchanged
/// - `InvalidRecipient`: a stored identity key does not decode
pub fn append_with<R: RandomSource>(
    rng: &mut R,
    envelope: &Envelope,
    private_key: &PrivateKey,
    new_keys: &[PublicKey],
) -> Result<Envelope, EnvelopeError> {
    let plaintext = open(envelope, private_key)?;

    let mut recipients = envelope.recipient_keys()?;
    let existing = recipients.len();
    for key in new_keys {
        if !recipients.contains(key) {
            recipients.push(*key);
        }
    }

    tracing::debug!(existing, added = recipients.len() - existing, "appending recipients");
    seal_with(rng, &plaintext, &recipients)
}

#[cfg(test)]
mod tests {
    use multiseal_crypto::KeyPair;

    use super::*;
    use crate::testing::SeededRandom;

    fn pair(seed: u64) -> KeyPair {
        KeyPair::generate(&mut SeededRandom::new(seed)).unwrap()
    }

    #[test]
    fn update_replaces_plaintext() {
        let a = pair(1);
        let mut rng = SeededRandom::new(100);
        let original = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();

        let updated = update_with(&mut rng, &original, a.private_key(), b"hello-updated").unwrap();

        assert_eq!(open(&updated, a.private_key()).unwrap().as_slice(), b"hello-updated");
        // Old envelope is untouched and still opens
        assert_eq!(open(&original, a.private_key()).unwrap().as_slice(), b"hello");
    }

    #[test]
    fn update_keeps_recipient_order() {
        let (a, b, c) = (pair(1), pair(2), pair(3));
        let mut rng = SeededRandom::new(100);
        let keys = [*c.public_key(), *a.public_key(), *b.public_key()];
        let original = seal_with(&mut rng, b"hello", &keys).unwrap();

        let updated = update_with(&mut rng, &original, b.private_key(), b"v2").unwrap();

        assert_eq!(updated.recipient_keys().unwrap(), keys.to_vec());
    }

    #[test]
    fn update_uses_fresh_randomness() {
        let a = pair(1);
        let mut rng = SeededRandom::new(100);
        let original = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();

        let updated = update_with(&mut rng, &original, a.private_key(), b"hello").unwrap();

        assert_ne!(updated.body, original.body);
        assert_ne!(
            updated.recipients[0].ephemeral_public_key,
            original.recipients[0].ephemeral_public_key
        );
        assert_ne!(updated.recipients[0].wrapped_key, original.recipients[0].wrapped_key);
    }

    #[test]
    fn update_requires_authorization() {
        let (a, outsider) = (pair(1), pair(2));
        let mut rng = SeededRandom::new(100);
        let original = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();

        let result = update_with(&mut rng, &original, outsider.private_key(), b"hijack");

        assert_eq!(result.unwrap_err(), EnvelopeError::NotFound { candidates: 1 });
    }

    #[test]
    fn update_reports_malformed_identity() {
        let (a, b) = (pair(1), pair(2));
        let mut rng = SeededRandom::new(100);
        let mut original =
            seal_with(&mut rng, b"hello", &[*a.public_key(), *b.public_key()]).unwrap();
        original.recipients[1].public_key.pop();

        let result = update_with(&mut rng, &original, a.private_key(), b"v2");

        assert!(matches!(result, Err(EnvelopeError::InvalidRecipient { index: 1, .. })));
    }

    #[test]
    fn update_propagates_authentication_failure() {
        let a = pair(1);
        let mut rng = SeededRandom::new(100);
        let mut tampered = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();
        tampered.body[30] ^= 0x01;

        let result = update_with(&mut rng, &tampered, a.private_key(), b"v2");

        assert_eq!(result.unwrap_err(), EnvelopeError::AuthenticationFailure { entries: 1 });
    }

    #[test]
    fn append_adds_new_recipient() {
        let (a, b) = (pair(1), pair(2));
        let mut rng = SeededRandom::new(100);
        let original = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();

        let appended =
            append_with(&mut rng, &original, a.private_key(), &[*b.public_key()]).unwrap();

        assert_eq!(appended.recipients.len(), 2);
        assert_eq!(open(&appended, a.private_key()).unwrap().as_slice(), b"hello");
        assert_eq!(open(&appended, b.private_key()).unwrap().as_slice(), b"hello");
        assert!(matches!(
            open(&original, b.private_key()),
            Err(EnvelopeError::NotFound { .. })
        ));
    }

    #[test]
    fn append_is_idempotent() {
        let (a, b) = (pair(1), pair(2));
        let mut rng = SeededRandom::new(100);
        let original = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();

        let once = append_with(&mut rng, &original, a.private_key(), &[*b.public_key()]).unwrap();
        let twice = append_with(&mut rng, &once, a.private_key(), &[*b.public_key()]).unwrap();

        assert_eq!(twice.recipient_keys().unwrap(), vec![*a.public_key(), *b.public_key()]);
    }

    #[test]
    fn append_dedups_within_new_keys() {
        let (a, b) = (pair(1), pair(2));
        let mut rng = SeededRandom::new(100);
        let original = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();

        let appended = append_with(
            &mut rng,
            &original,
            a.private_key(),
            &[*b.public_key(), *a.public_key(), *b.public_key()],
        )
        .unwrap();

        assert_eq!(appended.recipient_keys().unwrap(), vec![*a.public_key(), *b.public_key()]);
    }

    #[test]
    fn new_recipient_can_append_further() {
        let (a, b, c) = (pair(1), pair(2), pair(3));
        let mut rng = SeededRandom::new(100);
        let original = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();
        let with_b =
            append_with(&mut rng, &original, a.private_key(), &[*b.public_key()]).unwrap();

        let with_c = append_with(&mut rng, &with_b, b.private_key(), &[*c.public_key()]).unwrap();

        assert_eq!(open(&with_c, c.private_key()).unwrap().as_slice(), b"hello");
    }

    #[test]
    fn append_requires_authorization() {
        let (a, outsider) = (pair(1), pair(2));
        let mut rng = SeededRandom::new(100);
        let original = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();

        let result =
            append_with(&mut rng, &original, outsider.private_key(), &[*outsider.public_key()]);

        assert_eq!(result.unwrap_err(), EnvelopeError::NotFound { candidates: 1 });
    }

    #[test]
    fn append_propagates_authentication_failure() {
        let (a, b) = (pair(1), pair(2));
        let mut rng = SeededRandom::new(100);
        let mut tampered = seal_with(&mut rng, b"hello", &[*a.public_key()]).unwrap();
        tampered.body[30] ^= 0x01;

        let result = append_with(&mut rng, &tampered, a.private_key(), &[*b.public_key()]);

        assert_eq!(result.unwrap_err(), EnvelopeError::AuthenticationFailure { entries: 1 });
    }
}
