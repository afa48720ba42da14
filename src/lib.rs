//! Shard-aware UUID layouts with decomposition, plus UUIDv1, v4, v6 and COMB
//!
//! ```rust
//! use shard_uuid::{uuid_dispersed, uuid_local};
//!
//! let uuid = uuid_local();
//! println!("{}", uuid); // e.g., "f5166777-7a7f-bd53-7a50-013e4e2afc26"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid_dispersed();
//! println!("{}", uuid); // e.g., "c8c9cef9-7a7f-bd53-7a50-013e4e2afbde"
//! println!("{:?}", uuid.decompose()); // process id, MAC fragment and timestamp
//! ```
//!
//! # Field and bit layout
//!
//! The two shard layouts share the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            prefix                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          process_id           |  ver  |          mac          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |              mac              |          unix_ts_ms           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 32-bit `prefix` field carries a per-process counter. [`Layout::Local`] writes it
//!   big-endian and steps it by one, so consecutive identifiers share their leading bytes and land
//!   on the same shard of a key-range-sharded store. [`Layout::Dispersed`] steps it by
//!   [`DISPERSED_STEP`] and writes it little-endian with the nibbles of each byte swapped, so the
//!   leading byte changes on every call and writes spread over all shards.
//! - The 16-bit `process_id` field holds the process id modulo 65536.
//! - The 4-bit `ver` field is set at `1011` ([`VERSION_MARKER`]).
//! - The 28-bit `mac` field holds the low 28 bits of the hardware address.
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in milliseconds.
//!
//! The shard layouts do not set the RFC 4122 variant bits. [`Uuid::decompose`] recovers every
//! field but the prefix from an identifier; it reports only the version marker for identifiers of
//! other versions.
//!
//! # Node context
//!
//! The process id and hardware address are discovered once per process; see [`node_context`].
//! The environment variables [`PROCESS_ID_ENV`] and [`MAC_ADDRESS_ENV`] override the discovered
//! values, and [`init_node_context`] installs a context built by the caller.
//!
//! # Other features
//!
//! This library also supports the generation of UUID version 1, 4 and 6, and of COMB UUIDs that
//! sort by creation time when compared from the last byte:
//!
//! ```rust
//! use shard_uuid::{comb, uuid1, uuid4, uuid6};
//!
//! println!("{}", uuid1()); // e.g., "37f9f6ce-190a-11e9-9d6a-0242ac1c0002"
//! println!("{}", uuid4()); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! println!("{}", uuid6()); // e.g., "1e9190a3-7f9f-66ce-9d6a-0242ac1c0002"
//! println!("{}", comb()); // e.g., "d1e5c8a2-4f0b-93e7-ce66-9f7fa390911e"
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` enables node discovery and the system clock.
//! - `global_gen` (implies `std`) enables the primary entry point functions and the process-wide
//!   generators.
//!
//! Optional features:
//!
//! - `serde` enables serialization and deserialization of [`Uuid`] via serde.
//! - `uuid` enables conversion from/to the [`Uuid`] type of the `uuid` crate.
//! - `tracing` emits events on node discovery and a trace span per generated identifier.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::Uuid;

mod error;
pub use error::ParseError;
#[cfg(feature = "std")]
pub use error::NodeContextError;

mod time;
pub use time::TimeSource;
#[cfg(feature = "std")]
pub use time::StdSystemTime;

mod node;
pub use node::{NodeContext, VERSION_MARKER};
#[cfg(feature = "std")]
pub use node::{MAC_ADDRESS_ENV, PROCESS_ID_ENV};

mod counter;
pub use counter::hourly_seed;

mod shard;
pub use shard::{Layout, ShardGenerator, DISPERSED_STEP};

mod decompose;
pub use decompose::Decomposed;

pub mod comb;
pub mod v6;

mod gen1;
pub use gen1::{V1Generator, DEFAULT_ROLLBACK_ALLOWANCE, GREGORIAN_OFFSET};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{
    comb, init_node_context, node_context, uuid1, uuid4, uuid6, uuid_dispersed, uuid_local,
};
