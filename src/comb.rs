//! COMB (combined time and random) UUIDs

use crate::Uuid;

/// Assembles a COMB UUID from a UUIDv6 and 64 random bits.
///
/// The random bits fill the most significant half. The time-bearing upper half of `v6` is
/// byte-reversed into the least significant half, so bytes 8-15 run from the fastest-changing
/// time byte to the slowest:
///
/// ```text
///  8 9 10 11 12 13 14 15
///  |                  `- slowest changing
///  `- fastest changing
/// ```
///
/// Stores that weigh the trailing bytes first when comparing identifiers, such as SQL Server's
/// `uniqueidentifier`, then sort COMB keys roughly by creation time, which keeps clustered index
/// inserts near the end of the index while the 64 random bits keep collisions unlikely.
///
/// # Examples
///
/// ```rust
/// use shard_uuid::{comb, Uuid};
///
/// let v6: Uuid = "1e9190a3-7f9f-66ce-9d6a-0242ac1c0002".parse()?;
/// let e = comb::assemble(v6, 0x0123_4567_89ab_cdef);
/// assert_eq!(e.to_string(), "01234567-89ab-cdef-ce66-9f7fa390911e");
/// # Ok::<(), shard_uuid::ParseError>(())
/// ```
pub const fn assemble(v6: Uuid, random: u64) -> Uuid {
    let (time, _) = v6.as_u64_pair();
    Uuid::from_u64_pair(random, time.swap_bytes())
}

#[cfg(test)]
mod tests {
    use super::assemble;
    use crate::{v6::reorder_time_field, Uuid};

    /// Places reversed time bytes in lower half
    #[test]
    fn places_reversed_time_bytes_in_lower_half() {
        let v6 = "1e9190a3-7f9f-66ce-9d6a-0242ac1c0002".parse::<Uuid>().unwrap();
        let e = assemble(v6, u64::MAX);
        assert_eq!(&e.as_bytes()[..8], &[0xff; 8]);
        assert_eq!(
            &e.as_bytes()[8..],
            &[0xce, 0x66, 0x9f, 0x7f, 0xa3, 0x90, 0x91, 0x1e]
        );
    }

    /// Orders lower half by creation time when compared from the last byte
    #[test]
    fn orders_lower_half_by_creation_time_when_compared_from_the_last_byte() {
        let node = [0x02, 0x42, 0xac, 0x1c, 0x00, 0x02];
        let mut prev: Option<[u8; 8]> = None;
        for i in 0..10_000u64 {
            let v1 = Uuid::from_fields_v1(0x1e9_190a_37f9_f6ce + i * 7_919, 0, &node);
            let e = assemble(reorder_time_field(v1), i.wrapping_mul(0x9e37_79b9_7f4a_7c15));
            let mut key = <[u8; 8]>::try_from(&e.as_bytes()[8..]).unwrap();
            key.reverse();
            if let Some(prev) = prev {
                assert!(prev < key);
            }
            prev = Some(key);
        }
    }
}
