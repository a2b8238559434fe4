//! Nonce issuance
//!
//! Nonces tag otherwise-identical quotes so a client can tell them apart.
//! They are not a security mechanism: issuance is not collision-checked and
//! the random source is not cryptographic.

use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;

/// Exclusive upper bound for issued nonces.
pub const NONCE_BOUND: u32 = 99_999;

/// Source of quote nonces in `[0, NONCE_BOUND)`.
///
/// The quoting engine takes the source as a capability so tests can
/// substitute a deterministic counter for the process-wide random generator.
pub trait NonceSource: Send + Sync {
    /// Issue the next nonce.
    fn next_nonce(&self) -> u32;
}

/// Production nonce source backed by the thread-local random generator.
#[derive(Debug, Default)]
pub struct RandomNonceSource;

impl NonceSource for RandomNonceSource {
    fn next_nonce(&self) -> u32 {
        rand::thread_rng().gen_range(0..NONCE_BOUND)
    }
}

/// Deterministic counter source for tests, wrapping at the bound.
#[derive(Debug, Default)]
pub struct SequentialNonceSource {
    counter: AtomicU32,
}

impl SequentialNonceSource {
    /// Create a source that issues `start` first.
    pub fn starting_at(start: u32) -> Self {
        Self {
            counter: AtomicU32::new(start),
        }
    }
}

impl NonceSource for SequentialNonceSource {
    fn next_nonce(&self) -> u32 {
        self.counter.fetch_add(1, Ordering::Relaxed) % NONCE_BOUND
    }
}
