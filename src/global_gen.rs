//! Default generators and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{NodeContext, ShardGenerator, StdSystemTime, Uuid};
use inner::GlobalGenInner;

static NODE_CONTEXT: sync::OnceLock<NodeContext> = sync::OnceLock::new();

/// Returns the process-wide node context, discovering it from the host on first use.
///
/// # Panics
///
/// Panics if [`NodeContext::discover`] fails, i.e., when an override environment variable is
/// malformed. Call [`init_node_context`] at startup to handle that case explicitly.
pub fn node_context() -> &'static NodeContext {
    NODE_CONTEXT.get_or_init(|| {
        NodeContext::discover().expect("shard_uuid: could not determine node context")
    })
}

/// Installs the process-wide node context.
///
/// This must happen before the first identifier is generated. Returns the rejected context if one
/// is already in place.
///
/// # Examples
///
/// ```rust
/// use shard_uuid::{init_node_context, NodeContext};
///
/// let node = NodeContext::discover()?;
/// let _ = init_node_context(node);
/// # Ok::<(), shard_uuid::NodeContextError>(())
/// ```
pub fn init_node_context(node: NodeContext) -> Result<(), NodeContext> {
    NODE_CONTEXT.set(node)
}

/// Returns the process-wide shard generator, creating one if none exists.
fn global_shard_gen() -> &'static ShardGenerator<StdSystemTime> {
    static G: sync::OnceLock<ShardGenerator<StdSystemTime>> = sync::OnceLock::new();
    G.get_or_init(|| ShardGenerator::new(*node_context(), &mut inner::new_rng()))
}

/// Returns the lock handle of process-wide UUIDv1 generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(|| sync::Mutex::new(GlobalGenInner::new(node_context())))
        .lock()
        .expect("shard_uuid: could not lock global generator")
}

/// Generates a shard-layout UUID whose leading bytes change slowly across calls.
///
/// Consecutive identifiers share their first bytes, so a key-range-sharded store receives them
/// on the same shard. The counter starts from a hash of the current date and hour, so processes
/// started within the same hour produce overlapping prefixes.
///
/// # Examples
///
/// ```rust
/// let a = shard_uuid::uuid_local();
/// let b = shard_uuid::uuid_local();
/// println!("{a}\n{b}"); // e.g., "f5166777-7a7f-bd53-7a50-013e4e2afc26" then "f5166778-..."
/// ```
pub fn uuid_local() -> Uuid {
    global_shard_gen().generate_local()
}

/// Generates a shard-layout UUID whose leading bytes change on every call.
///
/// # Examples
///
/// ```rust
/// let uuid = shard_uuid::uuid_dispersed();
/// println!("{uuid}"); // e.g., "c8c9cef9-7a7f-bd53-7a50-013e4e2afbde"
/// assert_eq!(uuid.decompose().process_id(), Some(shard_uuid::node_context().process_id()));
/// ```
pub fn uuid_dispersed() -> Uuid {
    global_shard_gen().generate_dispersed()
}

/// Generates a UUIDv1 object.
///
/// The node id is the hardware address of the [`node_context`], or a random multicast address
/// when the host has none.
///
/// # Examples
///
/// ```rust
/// let uuid = shard_uuid::uuid1();
/// println!("{uuid}"); // e.g., "37f9f6ce-190a-11e9-9d6a-0242ac1c0002"
/// ```
pub fn uuid1() -> Uuid {
    lock_global_gen().get_mut().generate()
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = shard_uuid::uuid4();
/// println!("{uuid}"); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    lock_global_gen().get_mut().generate_v4()
}

/// Generates a UUIDv6 object by reordering the time fields of a fresh UUIDv1.
///
/// # Examples
///
/// ```rust
/// let uuid = shard_uuid::uuid6();
/// println!("{uuid}"); // e.g., "1e9190a3-7f9f-66ce-9d6a-0242ac1c0002"
/// ```
pub fn uuid6() -> Uuid {
    crate::v6::reorder_time_field(uuid1())
}

/// Generates a COMB UUID. See [`comb::assemble`](crate::comb::assemble) for the layout.
///
/// # Examples
///
/// ```rust
/// let uuid = shard_uuid::comb();
/// println!("{uuid}"); // e.g., "d1e5c8a2-4f0b-93e7-ce66-9f7fa390911e"
/// ```
pub fn comb() -> Uuid {
    lock_global_gen().get_mut().generate_comb()
}

mod inner {
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    use crate::{NodeContext, V1Generator};

    /// Returns a ChaCha12 generator seeded from the operating system.
    pub fn new_rng() -> ChaCha12Rng {
        ChaCha12Rng::from_entropy()
    }

    /// A thin wrapper to reseed the random number generator when the process ID changes (i.e.,
    /// upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        node_id: [u8; 6],
        generator: V1Generator<ChaCha12Rng>,
    }

    impl GlobalGenInner {
        pub fn new(node: &NodeContext) -> Self {
            let node_id = *node.mac_address();
            let generator = if node_id == [0; 6] {
                V1Generator::with_random_node(new_rng())
            } else {
                V1Generator::new(node_id, new_rng())
            };
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                node_id,
                generator,
            }
        }

        /// Returns a mutable reference to the inner [`V1Generator`] instance, drawing a fresh
        /// random state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V1Generator<ChaCha12Rng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Self::new(&NodeContext::new(0, self.node_id));
            }
            &mut self.generator
        }
    }
}



#[cfg(test)]
mod tests_v4 {
    use super::uuid4;

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid4().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let mut it = bins.iter_mut().rev();
                for c in e.chars().rev() {
                    if let Some(mut num) = c.to_digit(16) {
                        for _ in 0..4 {
                            *it.next().unwrap() += num & 1;
                            num >>= 1;
                        }
                    }
                }
            }
            bins
        });

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], n, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], 0, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in (0..48).chain(52..64).chain(66..128) {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {}: {}", i, p);
        }
    }

    /// Reports no shard fields for random identifiers
    #[test]
    fn reports_no_shard_fields_for_random_identifiers() {
        for _ in 0..1_000 {
            let d = uuid4().decompose();
            assert_eq!(d.version_marker(), 4);
            assert_eq!(d.process_id(), None);
            assert_eq!(d.unix_ts_ms(), None);
            assert!(d.mac_fragment().is_none());
        }
    }
}
