//! UUIDv6-related functionality

use crate::Uuid;

/// Converts a UUIDv1 into the UUIDv6 that carries the same timestamp, clock sequence and node.
///
/// UUIDv1 stores the 60-bit timestamp as `time_low`, `time_mid`, `time_hi`, so its byte order
/// does not follow creation time. This function moves the fields into most-to-least significant
/// order and sets the version to 6, leaving the lower 64 bits untouched:
///
/// ```text
/// v1: time_low(32) time_mid(16) 1 time_hi(12)     | clock_seq node
/// v6: time_hi(12) time_mid(16) time_low[31:12](20) 6 time_low[11:0](12) | clock_seq node
/// ```
///
/// The transform is a one-way relabeling: applying it to its own output does not restore the
/// input.
///
/// # Examples
///
/// ```rust
/// use shard_uuid::{v6::reorder_time_field, Uuid};
///
/// let v1: Uuid = "37f9f6ce-190a-11e9-9d6a-0242ac1c0002".parse()?;
/// assert_eq!(reorder_time_field(v1).to_string(), "1e9190a3-7f9f-66ce-9d6a-0242ac1c0002");
/// # Ok::<(), shard_uuid::ParseError>(())
/// ```
pub const fn reorder_time_field(v1: Uuid) -> Uuid {
    let (ut, low) = v1.as_u64_pair();
    Uuid::from_u64_pair(reorder_high(ut), low)
}

/// Applies the v1-to-v6 reorder to the most significant 64 bits.
const fn reorder_high(ut: u64) -> u64 {
    ((ut >> 32) & 0x0fff)                       // time_low[11:0]
        | 0x6000                                // version
        | ((ut >> 28) & 0x0000_000f_ffff_0000)  // time_low[31:12]
        | ((ut << 20) & 0x000f_fff0_0000_0000)  // time_mid
        | (ut << 52)                            // time_hi
}
