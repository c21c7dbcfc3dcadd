//! Fuzz target for opening adversarial envelopes
//!
//! Envelopes arrive from an external decoder, so every field can be garbage.
//!
//! # Strategy
//!
//! - Arbitrary recipient entries (wrong-length keys, low-order points,
//!   truncated wrapped keys)
//! - Arbitrary body bytes
//! - Optionally splice in one genuine entry for the fuzzed private key
//!
//! # Invariants
//!
//! - `open` never panics
//! - Without a genuine entry, no plaintext is ever returned
//! - A genuine entry ahead of all garbage always opens

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use multiseal_core::{Envelope, EnvelopeError, Recipient, Version, open, seal_with};
use multiseal_crypto::{CryptoError, PrivateKey, RandomSource};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

struct SeededRandom(ChaCha20Rng);

impl RandomSource for SeededRandom {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> Result<(), CryptoError> {
        self.0.fill_bytes(buffer);
        Ok(())
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct OpenScenario {
    /// Private key used to open
    private_key: [u8; 32],
    /// Garbage recipient entries
    entries: Vec<FuzzEntry>,
    /// Garbage body
    body: Vec<u8>,
    /// Seal a genuine envelope for `private_key` and put its entry first
    genuine: Option<Genuine>,
}

#[derive(Debug, Clone, Arbitrary)]
struct FuzzEntry {
    public_key: Vec<u8>,
    ephemeral_public_key: EphemeralKey,
    wrapped_key: Vec<u8>,
}

#[derive(Debug, Clone, Arbitrary)]
enum EphemeralKey {
    Empty,
    Zero,
    Point([u8; 32]),
    Arbitrary(Vec<u8>),
}

impl EphemeralKey {
    fn to_bytes(&self) -> Vec<u8> {
        match self {
            EphemeralKey::Empty => Vec::new(),
            EphemeralKey::Zero => vec![0u8; 32],
            EphemeralKey::Point(b) => b.to_vec(),
            EphemeralKey::Arbitrary(b) => b.clone(),
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct Genuine {
    seed: u64,
    plaintext: Vec<u8>,
}

fuzz_target!(|scenario: OpenScenario| {
    let private_key = PrivateKey::from_bytes(scenario.private_key);

    let garbage: Vec<Recipient> = scenario
        .entries
        .iter()
        .take(16)
        .map(|entry| Recipient {
            public_key: entry.public_key.clone(),
            ephemeral_public_key: entry.ephemeral_public_key.to_bytes(),
            wrapped_key: entry.wrapped_key.clone(),
        })
        .collect();

    match scenario.genuine {
        None => {
            let envelope = Envelope::new(Version::V1, garbage, scenario.body);

            // INVARIANT: garbage never yields plaintext
            assert!(open(&envelope, &private_key).is_err(), "garbage envelope must not open");
        },
        Some(genuine) => {
            let mut rng = SeededRandom(ChaCha20Rng::seed_from_u64(genuine.seed));
            let sealed =
                match seal_with(&mut rng, &genuine.plaintext, &[private_key.public_key()]) {
                    Ok(sealed) => sealed,
                    Err(EnvelopeError::InvalidKey { .. }) => return,
                    Err(e) => panic!("unexpected seal failure: {e}"),
                };

            let mut recipients = sealed.recipients.clone();
            recipients.extend(garbage);
            let envelope = Envelope::new(sealed.version, recipients, sealed.body.clone());

            // INVARIANT: first matching entry wins before garbage is reached
            let opened = open(&envelope, &private_key).expect("genuine entry must open");
            assert_eq!(opened.as_slice(), genuine.plaintext.as_slice());
        },
    }
});
