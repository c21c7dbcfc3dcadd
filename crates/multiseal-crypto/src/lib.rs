//! Multiseal Cryptographic Primitives
//!
//! Building blocks for multi-recipient envelopes. All randomness is drawn
//! through [`RandomSource`], so callers can supply a seeded source for
//! deterministic testing and [`OsRandom`] in production.
//!
//! # Key Wrapping
//!
//! A random body key encrypts the payload once. For every recipient, a fresh
//! ephemeral key pair performs X25519 against the recipient's public key,
//! and HKDF turns the shared secret into a wrap key that encrypts the body
//! key.
//!
//! ```text
//! Ephemeral Private ──┐
//!                     ├─ X25519 ─► Shared Secret
//! Recipient Public ───┘                 │
//!                                       ▼
//!       HKDF-SHA256 (salt = ephemeral_public || recipient_public)
//!                                       │
//!                                       ▼
//!                                   Wrap Key
//!                                       │
//!                                       ▼
//!        XChaCha20-Poly1305(Wrap Key, Body Key) → Wrapped Key
//! ```
//!
//! # Security
//!
//! Key Isolation:
//! - Each recipient entry uses its own ephemeral key, never reused
//! - The HKDF salt binds a wrap key to one (ephemeral, recipient) pair
//!
//! Contributory Agreement:
//! - Low-order peer points are rejected instead of producing an all-zero
//!   shared secret
//!
//! Authenticity:
//! - XChaCha20-Poly1305 AEAD detects any modification
//! - Failed authentication tag -> no plaintext
//!
//! Key Hygiene:
//! - Private keys, shared secrets and symmetric keys are zeroized on drop

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
pub mod agreement;
pub mod error;
pub mod keys;
pub mod random;

#[cfg(test)]
mod testing;

pub use aead::{KEY_SIZE, NONCE_SIZE, SymmetricKey, TAG_SIZE, decrypt, encrypt};
pub use agreement::{SharedSecret, derive_wrap_key, shared_secret};
pub use error::CryptoError;
pub use keys::{KeyPair, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, PrivateKey, PublicKey};
pub use random::{OsRandom, RandomSource};
