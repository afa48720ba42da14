//! UUIDv1 generator and related types.

use rand::RngCore;

use crate::Uuid;

/// The number of 100-nanosecond intervals between 1582-10-15 and 1970-01-01.
pub const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// The suggested `rollback_allowance` (ten seconds in 100-nanosecond intervals).
pub const DEFAULT_ROLLBACK_ALLOWANCE: u64 = 100_000_000;

const MAX_TIMESTAMP: u64 = (1 << 60) - 1;
const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;

/// Represents a UUIDv1 generator that encapsulates the last timestamp and the clock sequence.
///
/// The generator returns strictly increasing timestamps: when the clock reports a value that is
/// not greater than the previous one, it goes on with the previous value plus one interval. UUIDv1
/// is the input of [`reorder_time_field`](crate::v6::reorder_time_field), which turns it into a
/// sortable UUIDv6.
///
/// # Examples
///
/// ```rust
/// use shard_uuid::V1Generator;
///
/// let mut g = V1Generator::new([0x02, 0x42, 0xac, 0x1c, 0x00, 0x02], rand::thread_rng());
/// println!("{}", g.generate());
/// ```
///
/// # Generator functions
///
/// | Flavor                     | Timestamp | On big clock rewind                      |
/// | -------------------------- | --------- | ---------------------------------------- |
/// | [`generate`]               | Now       | Changes clock sequence and goes on       |
/// | [`generate_or_reset_core`] | Argument  | Changes clock sequence and goes on       |
/// | [`generate_or_abort_core`] | Argument  | Returns `None`                           |
///
/// [`generate`]: V1Generator::generate
/// [`generate_or_reset_core`]: V1Generator::generate_or_reset_core
/// [`generate_or_abort_core`]: V1Generator::generate_or_abort_core
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V1Generator<R> {
    timestamp: u64,
    clock_seq: Option<u16>,
    node_id: [u8; 6],

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: RngCore> V1Generator<R> {
    /// Creates a generator instance with a node id, typically a hardware address.
    pub const fn new(node_id: [u8; 6], rng: R) -> Self {
        Self {
            timestamp: 0,
            clock_seq: None,
            node_id,
            rng,
        }
    }

    /// Creates a generator instance with a random node id.
    ///
    /// The multicast bit of the node id is set so that it cannot clash with a real hardware
    /// address (RFC 4122, section 4.5).
    pub fn with_random_node(mut rng: R) -> Self {
        let mut node_id = [0u8; 6];
        rng.fill_bytes(&mut node_id);
        node_id[0] |= 0x01;
        Self::new(node_id, rng)
    }

    /// Returns the node id written to every UUID.
    pub const fn node_id(&self) -> &[u8; 6] {
        &self.node_id
    }

    /// Generates a new UUIDv1 object from the current timestamp, or changes the clock sequence
    /// upon significant timestamp rollback.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate(&mut self) -> Uuid {
        let ticks = (crate::StdSystemTime::unix_ts_ns() / 100) as u64 + GREGORIAN_OFFSET;
        self.generate_or_reset_core(ticks, DEFAULT_ROLLBACK_ALLOWANCE)
    }

    /// Generates a new UUIDv1 object from the `timestamp` passed, or changes the clock sequence
    /// and restarts from `timestamp` upon significant timestamp rollback.
    ///
    /// `timestamp` is the count of 100-nanosecond intervals since 1582-10-15 00:00:00 UTC. The
    /// `rollback_allowance` parameter specifies the amount of rollback that is considered
    /// significant; a suggested value is [`DEFAULT_ROLLBACK_ALLOWANCE`].
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` is not a 60-bit positive integer.
    pub fn generate_or_reset_core(&mut self, timestamp: u64, rollback_allowance: u64) -> Uuid {
        if let Some(value) = self.generate_or_abort_core(timestamp, rollback_allowance) {
            value
        } else {
            // resume from given timestamp with new clock sequence
            let clock_seq = (self.clock_seq() + 1) & MAX_CLOCK_SEQ;
            self.clock_seq = Some(clock_seq);
            self.timestamp = timestamp;
            Uuid::from_fields_v1(self.timestamp, clock_seq, &self.node_id)
        }
    }

    /// Generates a new UUIDv1 object from the `timestamp` passed, or returns `None` upon
    /// significant timestamp rollback.
    ///
    /// See [`generate_or_reset_core`](Self::generate_or_reset_core) for the parameters.
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` is not a 60-bit positive integer.
    pub fn generate_or_abort_core(
        &mut self,
        timestamp: u64,
        rollback_allowance: u64,
    ) -> Option<Uuid> {
        assert!(
            0 < timestamp && timestamp <= MAX_TIMESTAMP,
            "`timestamp` must be a 60-bit positive integer"
        );
        assert!(
            rollback_allowance <= MAX_TIMESTAMP,
            "`rollback_allowance` out of reasonable range"
        );

        let clock_seq = self.clock_seq();
        if timestamp > self.timestamp {
            self.timestamp = timestamp;
        } else if timestamp + rollback_allowance >= self.timestamp
            && self.timestamp < MAX_TIMESTAMP
        {
            // go on with previous timestamp if new one is not much smaller
            self.timestamp += 1;
        } else {
            // abort if clock went backwards to unbearable extent
            return None;
        }

        Some(Uuid::from_fields_v1(self.timestamp, clock_seq, &self.node_id))
    }

    /// Returns the clock sequence, drawing a random one upon first use.
    fn clock_seq(&mut self) -> u16 {
        *self
            .clock_seq
            .get_or_insert_with(|| self.rng.next_u32() as u16 & MAX_CLOCK_SEQ)
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    #[cfg(feature = "global_gen")]
    pub(crate) fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes[6] = 0x40 | (bytes[6] >> 4);
        bytes[8] = 0x80 | (bytes[8] >> 2);
        Uuid::from(bytes)
    }

    /// Generates a new COMB UUID from a UUIDv6 and the random number generator inside.
    #[cfg(feature = "global_gen")]
    pub(crate) fn generate_comb(&mut self) -> Uuid {
        let v6 = crate::v6::reorder_time_field(self.generate());
        crate::comb::assemble(v6, self.rng.next_u64())
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv1 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use shard_uuid::V1Generator;
///
/// V1Generator::with_random_node(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: RngCore> Iterator for V1Generator<R> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: RngCore> std::iter::FusedIterator for V1Generator<R> {}

#[cfg(feature = "std")]
#[cfg(test)]
mod tests {
    use super::{V1Generator, GREGORIAN_OFFSET};
    use crate::{v6::reorder_time_field, Uuid};
    use rand::rngs::ThreadRng;

    const NODE: [u8; 6] = [0x02, 0x42, 0xac, 0x1c, 0x00, 0x02];

    fn ticks_of(e: &Uuid) -> u64 {
        let (high, _) = reorder_time_field(*e).as_u64_pair();
        ((high >> 4) & !0x0fff) | (high & 0x0fff)
    }

    fn clock_seq_of(e: &Uuid) -> u16 {
        u16::from_be_bytes([e.as_bytes()[8], e.as_bytes()[9]]) & 0x3fff
    }

    /// Generates increasing timestamps even with decreasing or constant input
    #[test]
    fn generates_increasing_timestamps_even_with_decreasing_or_constant_input() {
        let ts = 0x01e9_190a_37f9_f6ceu64;
        let mut g = V1Generator::new(NODE, ThreadRng::default());
        let mut prev = g.generate_or_reset_core(ts, 100_000_000);
        assert_eq!(ticks_of(&prev), ts);
        for i in 0..100_000u64 {
            let curr = g.generate_or_reset_core(ts - i.min(4_000), 100_000_000);
            assert!(ticks_of(&prev) < ticks_of(&curr));
            assert!(reorder_time_field(prev) < reorder_time_field(curr));
            assert_eq!(clock_seq_of(&prev), clock_seq_of(&curr));
            prev = curr;
        }
    }

    /// Changes clock sequence if timestamp goes backwards a lot
    #[test]
    fn changes_clock_sequence_if_timestamp_goes_backwards_a_lot() {
        let ts = 0x01e9_190a_37f9_f6ceu64;
        let mut g = V1Generator::new(NODE, ThreadRng::default());
        let prev = g.generate_or_reset_core(ts, 10_000);

        let curr = g.generate_or_reset_core(ts - 10_000, 10_000);
        assert_eq!(ticks_of(&curr), ts + 1);
        assert_eq!(clock_seq_of(&prev), clock_seq_of(&curr));

        let curr = g.generate_or_reset_core(ts - 10_002, 10_000);
        assert_eq!(ticks_of(&curr), ts - 10_002);
        assert_eq!(clock_seq_of(&curr), (clock_seq_of(&prev) + 1) & 0x3fff);
        assert_ne!(prev, curr);
    }

    /// Returns None if timestamp goes backwards a lot
    #[test]
    fn returns_none_if_timestamp_goes_backwards_a_lot() {
        let ts = 0x01e9_190a_37f9_f6ceu64;
        let mut g = V1Generator::new(NODE, ThreadRng::default());
        let prev = g.generate_or_abort_core(ts, 10_000).unwrap();
        let curr = g.generate_or_abort_core(ts - 10_000, 10_000);
        assert!(ticks_of(&prev) < ticks_of(&curr.unwrap()));

        assert!(g.generate_or_abort_core(ts - 10_002, 10_000).is_none());
        assert!(g.generate_or_abort_core(ts - 10_003, 10_000).is_none());
    }

    /// Sets version, variant and node fields
    #[test]
    fn sets_version_variant_and_node_fields() {
        let mut g = V1Generator::new(NODE, ThreadRng::default());
        for _ in 0..1_000 {
            let e = g.generate();
            assert_eq!(e.version_marker(), 1);
            assert_eq!(e.as_bytes()[8] >> 6, 0b10);
            assert_eq!(&e.as_bytes()[10..], &NODE);
        }
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use std::time;
        let mut g = V1Generator::with_random_node(ThreadRng::default());
        for _ in 0..10_000 {
            let ts_now = (time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_millis()) as i64;
            let ticks = ticks_of(&g.generate());
            let timestamp = ((ticks - GREGORIAN_OFFSET) / 10_000) as i64;
            assert!((ts_now - timestamp).abs() < 16);
        }
    }

    /// Sets multicast bit of random node
    #[test]
    fn sets_multicast_bit_of_random_node() {
        for _ in 0..100 {
            let g = V1Generator::with_random_node(ThreadRng::default());
            assert_eq!(g.node_id()[0] & 0x01, 0x01);
        }
    }
}
