//! Authenticated encryption using `XChaCha20-Poly1305`
//!
//! The 24-byte nonce is drawn from the caller's random source and prepended
//! to the ciphertext, so a ciphertext is self-contained:
//!
//! ```text
//! nonce (24) || ciphertext || Poly1305 tag (16)
//! ```
//!
//! Random 192-bit nonces make collisions negligible even when many body keys
//! and wrap keys are generated.

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use zeroize::{Zeroize, Zeroizing};

use crate::{error::CryptoError, random::RandomSource};

/// Symmetric key size (32 bytes)
pub const KEY_SIZE: usize = 32;

/// `XChaCha20` nonce size (24 bytes)
pub const NONCE_SIZE: usize = 24;

/// Poly1305 tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// A 256-bit key for `XChaCha20-Poly1305`.
///
/// Used both as the envelope body key and as a per-recipient wrap key.
#[derive(Clone)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Draw a fresh random key.
    pub fn generate<R: RandomSource>(rng: &mut R) -> Result<Self, CryptoError> {
        Ok(Self(rng.random_array()?))
    }

    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl TryFrom<&[u8]> for SymmetricKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKeyLength { expected: KEY_SIZE, actual: bytes.len() }
        })?;
        Ok(Self(key))
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Encrypt `plaintext` under `key`.
///
/// Returns `nonce || ciphertext || tag`. Fails only if the random source
/// cannot supply a nonce.
pub fn encrypt<R: RandomSource>(
    rng: &mut R,
    key: &SymmetricKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let nonce: [u8; NONCE_SIZE] = rng.random_array()?;
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    let Ok(ciphertext) = cipher.encrypt(XNonce::from_slice(&nonce), plaintext) else {
        unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt the output of [`encrypt`].
///
/// # Errors
///
/// - `AuthenticationFailed`: wrong key, tampered bytes, or input shorter than
///   a nonce plus tag. No partial plaintext is ever returned.
pub fn decrypt(key: &SymmetricKey, sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::AuthenticationFailed);
    }

    let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::AuthenticationFailed)
}
