//! X25519 key agreement and wrap-key derivation using HKDF
//!
//! ```text
//! shared = X25519(private, peer_public)
//! wrap_key = HKDF-SHA256(ikm = shared, salt = ephemeral_public || target_public, info = "")
//! ```
//!
//! The salt binds the wrap key to the exact pair of public keys involved:
//! the same shared secret under a different (ephemeral, target) pair yields
//! an unrelated key.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::{
    aead::{KEY_SIZE, SymmetricKey},
    error::CryptoError,
    keys::{PUBLIC_KEY_SIZE, PrivateKey, PublicKey},
};

/// Raw X25519 shared secret. Zeroized on drop.
pub struct SharedSecret(Zeroizing<[u8; 32]>);

impl SharedSecret {
    /// Raw shared secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Compute the X25519 shared secret between `private` and `peer`.
///
/// # Errors
///
/// - `InvalidKey`: `peer` is a low-order point, so the result would not
///   depend on `private` at all
pub fn shared_secret(private: &PrivateKey, peer: &PublicKey) -> Result<SharedSecret, CryptoError> {
    let shared = private.to_dalek().diffie_hellman(&peer.to_dalek());

    if !shared.was_contributory() {
        return Err(CryptoError::InvalidKey {
            reason: format!("{peer:?} is a low-order point"),
        });
    }

    Ok(SharedSecret(Zeroizing::new(*shared.as_bytes())))
}

/// Derive the wrap key for one recipient entry.
///
/// Salt is `ephemeral || target`, ephemeral first, with no info string.
/// Deterministic: same inputs always produce the same key.
pub fn derive_wrap_key(
    secret: &SharedSecret,
    ephemeral: &PublicKey,
    target: &PublicKey,
) -> SymmetricKey {
    let mut salt = [0u8; 2 * PUBLIC_KEY_SIZE];
    salt[..PUBLIC_KEY_SIZE].copy_from_slice(ephemeral.as_bytes());
    salt[PUBLIC_KEY_SIZE..].copy_from_slice(target.as_bytes());

    let hkdf = Hkdf::<Sha256>::new(Some(&salt), secret.as_bytes());

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    let Ok(()) = hkdf.expand(&[], &mut key[..]) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };

    SymmetricKey::from_bytes(*key)
}
