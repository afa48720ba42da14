//! Lock-free counters backing the shard layouts.

use core::sync::atomic::{AtomicU32, Ordering};

/// Milliseconds per hour, the bucket width of [`hourly_seed`].
const HOUR_MS: u64 = 3_600_000;

/// A 32-bit counter that advances by a fixed step and wraps silently on overflow.
///
/// Every call to [`next`](Self::next) observes a distinct post-increment value, regardless of
/// how many threads share the counter, because the increment is a single atomic
/// read-modify-write on one location.
#[derive(Debug)]
pub(crate) struct Counter {
    value: AtomicU32,
    step: u32,
}

impl Counter {
    pub(crate) const fn new(seed: u32, step: u32) -> Self {
        Self {
            value: AtomicU32::new(seed),
            step,
        }
    }

    /// Advances the counter and returns the new value.
    pub(crate) fn next(&self) -> u32 {
        self.value
            .fetch_add(self.step, Ordering::Relaxed)
            .wrapping_add(self.step)
    }
}

/// Returns a counter seed that depends only on the UTC date and hour of `unix_ts_ms`.
///
/// Independent processes that start within the same hour compute the same seed without talking
/// to each other, so their [`Layout::Local`](crate::Layout::Local) counters begin in the same
/// region and the identifiers they emit share leading bytes.
///
/// # Examples
///
/// ```rust
/// use shard_uuid::hourly_seed;
///
/// let start_of_hour = 1_547_510_400_000; // 2019-01-15T00:00:00Z
/// assert_eq!(hourly_seed(start_of_hour), hourly_seed(start_of_hour + 3_599_999));
/// assert_ne!(hourly_seed(start_of_hour), hourly_seed(start_of_hour + 3_600_000));
/// ```
pub const fn hourly_seed(unix_ts_ms: u64) -> u32 {
    // SplitMix64 finalizer over the hour bucket
    let mut z = (unix_ts_ms / HOUR_MS).wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 32) as u32
}
