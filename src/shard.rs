//! Shard layouts and their generator.

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{counter::Counter, NodeContext, TimeSource, Uuid};

/// The 48-bit mask applied to the millisecond timestamp.
const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// Selects how the 32-bit counter is written to the first four bytes of a shard-layout UUID.
///
/// Both layouts share bytes 4-15 (process id, version marker, hardware address fragment and
/// timestamp) and differ in how consecutive identifiers compare:
///
/// ```text
/// Local:      f5166777-7a7f-bd53-7a50-013e4e2afc26
///             f5166778-7a7f-bd53-7a50-013e4e2afc26
///             f5166779-7a7f-bd53-7a50-013e4e2afc26
///
/// Dispersed:  c8c9cef9-7a7f-bd53-7a50-013e4e2afbde
///             14951cfa-7a7f-bd53-7a50-013e4e2afbde
///             6f5169fb-7a7f-bd53-7a50-013e4e2afbde
/// ```
///
/// Pick [`Local`](Self::Local) when a key-range-sharded store should receive a burst of writes
/// on one shard, and [`Dispersed`](Self::Dispersed) when writes should spread over all shards.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Layout {
    /// The counter advances by one and is written big-endian, so the leading byte changes only
    /// once every 2^24 identifiers.
    Local,

    /// The counter advances by [`DISPERSED_STEP`] and is written with its eight hex digits in
    /// reverse order, so the fastest-changing nibbles lead the identifier.
    Dispersed,
}

/// The increment of the [`Layout::Dispersed`] counter.
///
/// The value is odd, so the counter visits all 2^32 values before repeating.
pub const DISPERSED_STEP: u32 = 198_491_317;

impl Layout {
    /// Returns the amount the counter of this layout advances per identifier.
    pub const fn step(self) -> u32 {
        match self {
            Self::Local => 1,
            Self::Dispersed => DISPERSED_STEP,
        }
    }

    /// Converts a counter value into bytes 0-3 of the identifier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shard_uuid::Layout;
    ///
    /// assert_eq!(Layout::Local.prefix(0x1234_5678), [0x12, 0x34, 0x56, 0x78]);
    /// assert_eq!(Layout::Dispersed.prefix(0x1234_5678), [0x87, 0x65, 0x43, 0x21]);
    /// ```
    pub const fn prefix(self, count: u32) -> [u8; 4] {
        match self {
            Self::Local => count.to_be_bytes(),
            Self::Dispersed => {
                let le = count.to_le_bytes();
                [
                    le[0].rotate_left(4),
                    le[1].rotate_left(4),
                    le[2].rotate_left(4),
                    le[3].rotate_left(4),
                ]
            }
        }
    }

    /// Recovers the counter value from bytes 0-3 of an identifier of this layout.
    pub const fn count(self, id: &Uuid) -> u32 {
        let b = id.as_bytes();
        match self {
            Self::Local => u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            Self::Dispersed => u32::from_le_bytes([
                b[0].rotate_left(4),
                b[1].rotate_left(4),
                b[2].rotate_left(4),
                b[3].rotate_left(4),
            ]),
        }
    }

    /// Encodes a counter value, node context and timestamp into an identifier of this layout.
    ///
    /// Only the low 48 bits of `unix_ts_ms` are kept.
    pub const fn encode(self, count: u32, node: &NodeContext, unix_ts_ms: u64) -> Uuid {
        Uuid::from_fields_shard(
            self.prefix(count),
            node.process_id(),
            node.mac_address(),
            unix_ts_ms & MAX_TIMESTAMP,
        )
    }
}

/// Represents a thread-safe generator of shard-layout UUIDs.
///
/// The generator owns one counter per [`Layout`] and can be shared across threads by reference
/// (e.g., in a `static` or an `Arc`); generation never blocks.
///
/// # Examples
///
/// ```rust
/// use shard_uuid::{NodeContext, ShardGenerator};
///
/// let node = NodeContext::new(std::process::id(), [0x02, 0x42, 0xac, 0x1c, 0x00, 0x02]);
/// let g = ShardGenerator::new(node, &mut rand::thread_rng());
/// std::thread::scope(|s| {
///     for i in 0..4 {
///         let g = &g;
///         s.spawn(move || println!("{} by thread {}", g.generate_dispersed(), i));
///     }
/// });
/// ```
#[derive(Debug)]
pub struct ShardGenerator<T> {
    node: NodeContext,
    local: Counter,
    dispersed: Counter,
    time: T,
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl ShardGenerator<crate::StdSystemTime> {
    /// Creates a generator that reads the system clock.
    ///
    /// The [`Layout::Local`] counter is seeded with [`hourly_seed`](crate::hourly_seed) of the
    /// current time and the [`Layout::Dispersed`] counter with a random number from `rng`.
    pub fn new(node: NodeContext, rng: &mut impl rand::RngCore) -> Self {
        let time = crate::StdSystemTime;
        let local_seed = crate::hourly_seed(time.unix_ts_ms());
        Self::with_parts(node, local_seed, rng.next_u32(), time)
    }
}

impl<T: TimeSource> ShardGenerator<T> {
    /// Creates a generator from explicit counter seeds and a clock.
    pub const fn with_parts(
        node: NodeContext,
        local_seed: u32,
        dispersed_seed: u32,
        time: T,
    ) -> Self {
        Self {
            node,
            local: Counter::new(local_seed, Layout::Local.step()),
            dispersed: Counter::new(dispersed_seed, Layout::Dispersed.step()),
            time,
        }
    }

    /// Returns the node context written to every identifier.
    pub const fn node(&self) -> &NodeContext {
        &self.node
    }

    /// Generates a new UUID of the given layout.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self, layout: Layout) -> Uuid {
        let count = match layout {
            Layout::Local => self.local.next(),
            Layout::Dispersed => self.dispersed.next(),
        };
        layout.encode(count, &self.node, self.time.unix_ts_ms())
    }

    /// Generates a new UUID whose leading bytes change slowly across calls.
    pub fn generate_local(&self) -> Uuid {
        self.generate(Layout::Local)
    }

    /// Generates a new UUID whose leading bytes change on every call.
    pub fn generate_dispersed(&self) -> Uuid {
        self.generate(Layout::Dispersed)
    }
}
