//! Short id allocation.
//!
//! Ids are a base-36 rendering of the current UTC time in microseconds,
//! followed by two base-36 digits from a process-wide sequence. The result is
//! compact, URL-safe and ordered by creation time.
//!
//! Uniqueness is probabilistic: two processes sharing a store can still
//! collide. The mapping store rejects duplicates and
//! [`crate::application::services::LinkService`] retries with a fresh id.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of trailing sequence digits.
const SEQUENCE_DIGITS: u32 = 2;

/// 36^2 distinct sequence suffixes per microsecond.
const SEQUENCE_SPAN: u64 = 36u64.pow(SEQUENCE_DIGITS);

/// Renders `value` in lowercase base 36.
pub fn encode_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    // Alphabet is ASCII.
    String::from_utf8(digits).unwrap_or_default()
}

fn encode_base36_padded(value: u64, width: usize) -> String {
    format!("{:0>width$}", encode_base36(value), width = width)
}

/// Generates short ids from a timestamp and a sequence counter. No I/O.
#[derive(Debug, Default)]
pub struct IdentifierAllocator {
    sequence: AtomicU64,
}

impl IdentifierAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an id for the current instant.
    pub fn allocate(&self) -> String {
        let micros = Utc::now().timestamp_micros().max(0) as u64;
        self.allocate_at(micros)
    }

    /// Allocates an id for the given timestamp. Deterministic given the
    /// timestamp and the number of previous calls on this allocator.
    pub fn allocate_at(&self, timestamp_micros: u64) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) % SEQUENCE_SPAN;

        let mut id = encode_base36(timestamp_micros);
        id.push_str(&encode_base36_padded(sequence, SEQUENCE_DIGITS as usize));
        id
    }
}
