//! Fuzz target for seal/update/append sequences
//!
//! Drives a small pool of key holders through random envelope operations and
//! checks access against a model of who should be able to open.
//!
//! # Invariants
//!
//! - Every key in the model opens the current envelope with the current
//!   plaintext
//! - Every key outside the model gets `NotFound`
//! - Update and append by a non-member fail and leave the envelope alone
//! - Each key appears at most once after appends

#![no_main]

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use multiseal_core::{EnvelopeError, append_with, open, seal_with, update_with};
use multiseal_crypto::{CryptoError, KeyPair, RandomSource};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

const POOL_SIZE: usize = 4;

struct SeededRandom(ChaCha20Rng);

impl RandomSource for SeededRandom {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> Result<(), CryptoError> {
        self.0.fill_bytes(buffer);
        Ok(())
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct OpsScenario {
    seed: u64,
    plaintext: Vec<u8>,
    initial: u8,
    operations: Vec<Operation>,
}

#[derive(Debug, Clone, Arbitrary)]
enum Operation {
    Update { actor: u8, plaintext: Vec<u8> },
    Append { actor: u8, added: Vec<u8> },
}

fuzz_target!(|scenario: OpsScenario| {
    let mut rng = SeededRandom(ChaCha20Rng::seed_from_u64(scenario.seed));
    let pool: Vec<KeyPair> =
        (0..POOL_SIZE).map(|_| KeyPair::generate(&mut rng).expect("seeded rng")).collect();

    let first = scenario.initial as usize % POOL_SIZE;
    let mut members = BTreeSet::from([first]);
    let mut plaintext = scenario.plaintext;
    let mut envelope =
        seal_with(&mut rng, &plaintext, &[*pool[first].public_key()]).expect("valid keys seal");

    for op in scenario.operations.into_iter().take(8) {
        match op {
            Operation::Update { actor, plaintext: next } => {
                let actor = actor as usize % POOL_SIZE;
                match update_with(&mut rng, &envelope, pool[actor].private_key(), &next) {
                    Ok(updated) => {
                        assert!(members.contains(&actor), "non-member updated envelope");
                        envelope = updated;
                        plaintext = next;
                    },
                    Err(EnvelopeError::NotFound { .. }) => {
                        assert!(!members.contains(&actor), "member could not update");
                    },
                    Err(e) => panic!("unexpected update failure: {e}"),
                }
            },
            Operation::Append { actor, added } => {
                let actor = actor as usize % POOL_SIZE;
                let added: Vec<usize> =
                    added.iter().take(POOL_SIZE).map(|i| *i as usize % POOL_SIZE).collect();
                let keys: Vec<_> = added.iter().map(|i| *pool[*i].public_key()).collect();
                match append_with(&mut rng, &envelope, pool[actor].private_key(), &keys) {
                    Ok(appended) => {
                        assert!(members.contains(&actor), "non-member appended recipients");
                        envelope = appended;
                        members.extend(added);
                    },
                    Err(EnvelopeError::NotFound { .. }) => {
                        assert!(!members.contains(&actor), "member could not append");
                    },
                    Err(e) => panic!("unexpected append failure: {e}"),
                }
            },
        }

        assert_eq!(envelope.recipients.len(), members.len(), "recipient listed twice");
        for (index, pair) in pool.iter().enumerate() {
            match open(&envelope, pair.private_key()) {
                Ok(opened) => {
                    assert!(members.contains(&index), "non-member opened envelope");
                    assert_eq!(opened.as_slice(), plaintext.as_slice());
                },
                Err(EnvelopeError::NotFound { .. }) => {
                    assert!(!members.contains(&index), "member could not open");
                },
                Err(e) => panic!("unexpected open failure: {e}"),
            }
        }
    }
});
