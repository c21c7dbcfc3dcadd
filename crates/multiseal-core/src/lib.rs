//! Multiseal Envelope Core
//!
//! Multi-recipient hybrid encryption. A plaintext is encrypted once under a
//! random body key, and the body key is wrapped independently for each
//! recipient, so any single recipient's private key recovers the plaintext
//! on its own.
//!
//! # Operations
//!
//! ```text
//! seal(plaintext, [pub_1..pub_N])  ──► Envelope { version, recipients[N], body }
//! open(envelope, private)          ──► plaintext | NotFound | AuthenticationFailure
//! update(envelope, private, new)   ──► open (authorization) ──► seal(new, same keys)
//! append(envelope, private, keys)  ──► open ──► seal(plaintext, keys ∪ new keys)
//! ```
//!
//! Every operation is a pure function of its arguments and a caller-supplied
//! [`RandomSource`](multiseal_crypto::RandomSource). Nothing is cached
//! between calls and nothing is shared, so independent calls may run on
//! separate threads without coordination.
//!
//! # Invariants
//!
//! - Sealing is all-or-nothing: no partial envelope on any failure
//! - One fresh ephemeral key pair per recipient entry per seal
//! - Envelopes are never modified; update and append return new ones with
//!   entirely new randomness
//! - Opening tries every entry; only AEAD failures are skipped

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod envelope;
pub mod error;
pub mod open;
pub mod reseal;
pub mod seal;

#[cfg(test)]
mod testing;

pub use envelope::{Envelope, Recipient, Version};
pub use error::EnvelopeError;
pub use open::open;
pub use reseal::{append_with, update_with};
pub use seal::seal_with;
