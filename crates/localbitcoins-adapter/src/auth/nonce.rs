/*
[INPUT]:  Wall clock (or a pinned value)
[OUTPUT]: 63-bit nonces for the Apiauth-Nonce header
[POS]:    Auth layer - replay protection token source
[UPDATE]: When nonce generation strategy changes
*/

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Largest nonce the API accepts (63-bit positive integer)
pub const MAX_NONCE: u64 = i64::MAX as u64;

/// Source of nonces for signed requests
///
/// Successive values issued for the same credentials must never decrease.
pub trait NonceSource: Send + Sync + Debug {
    /// Produce the nonce for the next request
    fn next_nonce(&self) -> u64;
}

/// Milliseconds since the Unix epoch
pub fn unix_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Raw wall-clock nonce. Two calls in the same millisecond share a value.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClockNonce;

impl NonceSource for SystemClockNonce {
    fn next_nonce(&self) -> u64 {
        unix_millis()
    }
}

/// Clock-based nonce that never repeats or goes backwards
///
/// When the clock has not advanced past the last issued value (same
/// millisecond, or the clock stepped back) the previous nonce plus one is
/// issued instead.
#[derive(Debug, Default)]
pub struct MonotonicNonce {
    last: AtomicU64,
}

impl MonotonicNonce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start issuing above `floor`, e.g. the last nonce a previous process used
    pub fn starting_after(floor: u64) -> Self {
        Self {
            last: AtomicU64::new(floor),
        }
    }

    fn issue(&self, now: u64) -> u64 {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(last.saturating_add(1)).min(MAX_NONCE);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(current) => last = current,
            }
        }
    }
}

impl NonceSource for MonotonicNonce {
    fn next_nonce(&self) -> u64 {
        self.issue(unix_millis())
    }
}

/// Always returns the same nonce; for reproducible signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedNonce(pub u64);

impl NonceSource for FixedNonce {
    fn next_nonce(&self) -> u64 {
        self.0
    }
}
