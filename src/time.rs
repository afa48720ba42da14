//! Wall-clock abstraction used by the generators.

/// A trait that defines the minimum system clock interface for the generators.
///
/// Implementations are read through a shared reference because
/// [`ShardGenerator`](crate::ShardGenerator) is used concurrently from many threads.
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
impl StdSystemTime {
    /// Returns the current time as the number of nanoseconds since the Unix epoch.
    pub(crate) fn unix_ts_ns() -> u128 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_nanos()
    }
}

#[cfg(feature = "std")]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&self) -> u64 {
        (Self::unix_ts_ns() / 1_000_000) as u64
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn unix_ts_ms(&self) -> u64 {
        (**self).unix_ts_ms()
    }
}
