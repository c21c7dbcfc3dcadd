//! Randomness abstraction.
//!
//! Every random byte used by this crate (private scalars, body keys, AEAD
//! nonces) is drawn through [`RandomSource`]. Production code uses
//! [`OsRandom`]; tests inject seeded or failing sources.

use crate::error::CryptoError;

/// Source of cryptographically secure random bytes.
///
/// # Invariants
///
/// - Implementations used outside tests MUST be backed by a CSPRNG
/// - A failure is reported, never papered over with weak bytes
pub trait RandomSource {
    /// Fills `buffer` entirely with random bytes.
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> Result<(), CryptoError>;

    /// Returns a freshly filled fixed-size array.
    fn random_array<const N: usize>(&mut self) -> Result<[u8; N], CryptoError>
    where
        Self: Sized,
    {
        let mut bytes = [0u8; N];
        self.fill_bytes(&mut bytes)?;
        Ok(bytes)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill_bytes(buffer)
    }
}

/// Operating system CSPRNG (getrandom).
///
/// Uses `/dev/urandom`/`getrandom(2)` on Linux, `BCryptGenRandom` on Windows.
/// An OS failure surfaces as [`CryptoError::EntropyFailure`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> Result<(), CryptoError> {
        getrandom::fill(buffer)
            .map_err(|e| CryptoError::EntropyFailure { reason: e.to_string() })
    }
}
