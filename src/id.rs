#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

use fstr::FStr;

use crate::error::ParseError;

/// Represents a Universally Unique IDentifier.
///
/// The value is stored as 16 bytes in big-endian order, so the derived [`Ord`] matches both the
/// numeric order of the 128-bit integer and the lexicographic order of the canonical string.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID from the most significant and the least significant 64-bit halves.
    pub const fn from_u64_pair(high: u64, low: u64) -> Self {
        Self::from_u128(((high as u128) << 64) | low as u128)
    }

    /// Returns the most significant and the least significant 64-bit halves.
    pub const fn as_u64_pair(&self) -> (u64, u64) {
        let value = self.as_u128();
        ((value >> 64) as u64, value as u64)
    }

    /// Creates a UUID from a 128-bit unsigned integer in big-endian order.
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Returns the 128-bit unsigned integer representation.
    pub const fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Returns the 4-bit version field (the high nibble of byte 6).
    ///
    /// Identifiers produced by the shard layouts carry [`VERSION_MARKER`](crate::VERSION_MARKER)
    /// (`0xb`) here; standard layouts carry 1, 4, 6 and so on.
    pub const fn version_marker(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Creates a UUID byte array from the field values of the shard layouts.
    ///
    /// `prefix` occupies bytes 0-3 as given; see [`Layout`](crate::Layout) for how the counter is
    /// turned into the prefix.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    pub const fn from_fields_shard(
        prefix: [u8; 4],
        process_id: u16,
        mac_address: &[u8; 6],
        unix_ts_ms: u64,
    ) -> Self {
        assert!(unix_ts_ms < 1 << 48, "`unix_ts_ms` must be a 48-bit integer");

        Self([
            prefix[0],
            prefix[1],
            prefix[2],
            prefix[3],
            (process_id >> 8) as u8,
            process_id as u8,
            (crate::VERSION_MARKER << 4) | (mac_address[2] & 0x0f),
            mac_address[3],
            mac_address[4],
            mac_address[5],
            (unix_ts_ms >> 40) as u8,
            (unix_ts_ms >> 32) as u8,
            (unix_ts_ms >> 24) as u8,
            (unix_ts_ms >> 16) as u8,
            (unix_ts_ms >> 8) as u8,
            unix_ts_ms as u8,
        ])
    }

    /// Creates a UUID byte array from UUIDv1 field values.
    ///
    /// `timestamp` is the count of 100-nanosecond intervals since 1582-10-15 00:00:00 UTC.
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` is not a 60-bit integer or `clock_seq` is not a 14-bit integer.
    pub const fn from_fields_v1(timestamp: u64, clock_seq: u16, node_id: &[u8; 6]) -> Self {
        assert!(
            timestamp < 1 << 60 && clock_seq < 1 << 14,
            "invalid field value"
        );

        Self([
            (timestamp >> 24) as u8,
            (timestamp >> 16) as u8,
            (timestamp >> 8) as u8,
            timestamp as u8,
            (timestamp >> 40) as u8,
            (timestamp >> 32) as u8,
            0x10 | (timestamp >> 56) as u8,
            (timestamp >> 48) as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            node_id[0],
            node_id[1],
            node_id[2],
            node_id[3],
            node_id[4],
            node_id[5],
        ])
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the 8-4-4-4-12
    /// canonical hexadecimal string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shard_uuid::Uuid;
    ///
    /// let x = "f5166777-7a7f-bd53-7a50-013e4e2afc26".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "f5166777-7a7f-bd53-7a50-013e4e2afc26");
    /// assert_eq!(format!("{}", y), "f5166777-7a7f-bd53-7a50-013e4e2afc26");
    /// # Ok::<(), shard_uuid::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut r = 0;
        let mut w = 0;
        while r < 16 {
            let e = self.0[r] as usize;
            buffer[w] = DIGITS[e >> 4];
            buffer[w + 1] = DIGITS[e & 15];
            if r == 3 || r == 5 || r == 7 || r == 9 {
                buffer[w + 2] = b'-';
                w += 1;
            }
            r += 1;
            w += 2;
        }
        debug_assert!(buffer.is_ascii());

        // SAFETY: ok because buffer consists of ASCII bytes
        unsafe { FStr::from_inner_unchecked(buffer) }
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().and_then(|c| c.to_digit(16)).ok_or(ParseError)? as u8;
            let lo = iter.next().and_then(|c| c.to_digit(16)).ok_or(ParseError)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next() != Some('-') {
                return Err(ParseError);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ParseError)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        src.as_u128()
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from_u128(src)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl de::Visitor<'_> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "f5166777-7a7f-bd53-7a50-013e4e2afc26",
                    &[
                        245, 22, 103, 119, 122, 127, 189, 83, 122, 80, 1, 62, 78, 42, 252, 38,
                    ],
                ),
                (
                    "c8c9cef9-7a7f-bd53-7a50-013e4e2afbde",
                    &[
                        200, 201, 206, 249, 122, 127, 189, 83, 122, 80, 1, 62, 78, 42, 251, 222,
                    ],
                ),
                (
                    "1e9190a3-7f9f-66ce-9d6a-0242ac1c0002",
                    &[
                        30, 145, 144, 163, 127, 159, 102, 206, 157, 106, 2, 66, 172, 28, 0, 2,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }
    }
}
