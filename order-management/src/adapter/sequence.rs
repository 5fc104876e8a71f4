use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter for outbound wire message sequence numbers.
///
/// One instance is shared by every producer of a session; values never repeat
/// or go backward under concurrent calls. Instantiated per service rather
/// than process-wide so tests get isolated counters.
pub struct SequenceGenerator {
    counter: AtomicU64,
}

/// First sequence number handed out by a fresh generator.
pub const INITIAL_SEQUENCE: u64 = 1000;

impl SequenceGenerator {
    pub fn new() -> Self {
        Self::starting_at(INITIAL_SEQUENCE)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            counter: AtomicU64::new(first),
        }
    }

    pub fn generate(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
