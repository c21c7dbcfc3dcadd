//! X25519 key pairs
//!
//! Used both for long-term recipient identities and for the one-time
//! ephemeral keys generated per recipient at seal time.

use std::fmt;

use x25519_dalek::StaticSecret;
use zeroize::Zeroize;

use crate::{error::CryptoError, random::RandomSource};

/// Size of an X25519 public point in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of an X25519 private scalar in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;

/// X25519 public key (Montgomery u-coordinate).
///
/// Equality is exact byte equality, which is what recipient deduplication
/// relies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Wrap raw public key bytes.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Owned copy of the raw bytes, for storage in an envelope.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub(crate) fn to_dalek(self) -> x25519_dalek::PublicKey {
        x25519_dalek::PublicKey::from(self.0)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; PUBLIC_KEY_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKeyLength { expected: PUBLIC_KEY_SIZE, actual: bytes.len() }
        })?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..)")
    }
}

/// X25519 private scalar.
///
/// Owned by the caller and only borrowed by envelope operations. The bytes
/// are zeroized on drop and never printed.
#[derive(Clone)]
pub struct PrivateKey([u8; PRIVATE_KEY_SIZE]);

impl PrivateKey {
    /// Wrap raw private key bytes.
    ///
    /// Clamping happens inside the scalar multiplication, so any 32 bytes
    /// are a valid scalar.
    pub fn from_bytes(bytes: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Draw a new private key from `rng`.
    pub fn generate<R: RandomSource>(rng: &mut R) -> Result<Self, CryptoError> {
        Ok(Self(rng.random_array()?))
    }

    /// Raw private key bytes.
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.0
    }

    /// Public key for this scalar (base-point multiplication).
    pub fn public_key(&self) -> PublicKey {
        let secret = self.to_dalek();
        PublicKey(*x25519_dalek::PublicKey::from(&secret).as_bytes())
    }

    pub(crate) fn to_dalek(&self) -> StaticSecret {
        StaticSecret::from(self.0)
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; PRIVATE_KEY_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKeyLength { expected: PRIVATE_KEY_SIZE, actual: bytes.len() }
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A private key together with its public key.
#[derive(Debug, Clone)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    /// Generate a new key pair from `rng`.
    ///
    /// Fails only if the random source fails.
    pub fn generate<R: RandomSource>(rng: &mut R) -> Result<Self, CryptoError> {
        Ok(Self::from_private(PrivateKey::generate(rng)?))
    }

    /// Rebuild a key pair from an existing private key.
    pub fn from_private(private: PrivateKey) -> Self {
        Self { public: private.public_key(), private }
    }

    /// Public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Private half.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// Split into `(public, private)`.
    pub fn into_parts(self) -> (PublicKey, PrivateKey) {
        (self.public, self.private)
    }
}
