//! Deterministic randomness for unit tests

use multiseal_crypto::{CryptoError, RandomSource};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// ChaCha20 stream seeded from a `u64`; same seed, same envelope.
pub(crate) struct SeededRandom(ChaCha20Rng);

impl SeededRandom {
    pub(crate) fn new(seed: u64) -> Self {
        Self(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> Result<(), CryptoError> {
        self.0.fill_bytes(buffer);
        Ok(())
    }
}
