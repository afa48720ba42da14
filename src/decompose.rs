//! Field extraction from shard-layout UUIDs.

use crate::{Uuid, VERSION_MARKER};

/// The fields recovered from a UUID.
///
/// The version marker is always available. The remaining fields are only meaningful for
/// identifiers produced by the shard layouts (marker `0xb`); for any other identifier, such as a
/// random UUIDv4, they are `None`. A foreign identifier is a valid input, not an error.
///
/// # Examples
///
/// ```rust
/// use shard_uuid::{Decomposed, Uuid};
///
/// let id: Uuid = "f5166777-7a7f-bd53-7a50-013e4e2afc26".parse()?;
/// let d = Decomposed::new(&id);
/// assert_eq!(d.version_marker(), 0xb);
/// assert_eq!(d.process_id(), Some(0x7a7f));
/// assert_eq!(d.mac_fragment(), Some([0, 0, 0xd, 0x53, 0x7a, 0x50]));
/// assert_eq!(d.unix_ts_ms(), Some(0x013e_4e2a_fc26));
///
/// let v4: Uuid = "2ca4b2ce-6c13-40d4-bccf-37d222820f6f".parse()?;
/// assert_eq!(Decomposed::new(&v4).process_id(), None);
/// # Ok::<(), shard_uuid::ParseError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Decomposed {
    version_marker: u8,
    process_id: Option<u16>,
    mac_fragment: Option<[u8; 6]>,
    unix_ts_ms: Option<u64>,
}

impl Decomposed {
    /// Extracts the fields of `id`.
    pub const fn new(id: &Uuid) -> Self {
        let b = id.as_bytes();
        let version_marker = id.version_marker();
        if version_marker != VERSION_MARKER {
            return Self {
                version_marker,
                process_id: None,
                mac_fragment: None,
                unix_ts_ms: None,
            };
        }

        Self {
            version_marker,
            process_id: Some(u16::from_be_bytes([b[4], b[5]])),
            mac_fragment: Some([0, 0, b[6] & 0x0f, b[7], b[8], b[9]]),
            unix_ts_ms: Some(u64::from_be_bytes([
                0, 0, b[10], b[11], b[12], b[13], b[14], b[15],
            ])),
        }
    }

    /// Returns the high nibble of byte 6, e.g., `0xb` for the shard layouts or `4` for UUIDv4.
    pub const fn version_marker(&self) -> u8 {
        self.version_marker
    }

    /// Returns the id (modulo 65536) of the process that generated the UUID.
    pub const fn process_id(&self) -> Option<u16> {
        self.process_id
    }

    /// Returns the 28-bit hardware address fragment, zero-padded to six bytes: indices 0-1 are
    /// always zero and only the low nibble of index 2 is populated.
    pub const fn mac_fragment(&self) -> Option<[u8; 6]> {
        self.mac_fragment
    }

    /// Returns the generation time in milliseconds since the Unix epoch.
    pub const fn unix_ts_ms(&self) -> Option<u64> {
        self.unix_ts_ms
    }

    /// Returns the generation time as a [`SystemTime`](std::time::SystemTime).
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn timestamp(&self) -> Option<std::time::SystemTime> {
        use std::time;
        self.unix_ts_ms
            .map(|ms| time::UNIX_EPOCH + time::Duration::from_millis(ms))
    }
}

impl Uuid {
    /// Extracts the fields of this UUID. See [`Decomposed`].
    pub const fn decompose(&self) -> Decomposed {
        Decomposed::new(self)
    }
}

impl From<Uuid> for Decomposed {
    fn from(src: Uuid) -> Self {
        Self::new(&src)
    }
}

#[cfg(test)]
mod tests {
    use super::Decomposed;
    use crate::{Layout, NodeContext, Uuid};

    const NODE: NodeContext = NodeContext::new(0xbeef, [0xff, 0xee, 0xdd, 0xcc, 0xbb, 0xaa]);

    /// Inverts both layouts
    #[test]
    fn inverts_both_layouts() {
        let timestamps = [0, 1, 0x013e_4e2a_fc26, 1_700_000_000_000, (1 << 48) - 1];
        for layout in [Layout::Local, Layout::Dispersed] {
            for (i, ts) in timestamps.into_iter().enumerate() {
                let e = layout.encode(i as u32 * 0x0101_0101, &NODE, ts);
                let d = e.decompose();
                assert_eq!(d.version_marker(), 0xb);
                assert_eq!(d.process_id(), Some(0xbeef));
                assert_eq!(d.mac_fragment(), Some([0, 0, 0x0d, 0xcc, 0xbb, 0xaa]));
                assert_eq!(d.unix_ts_ms(), Some(ts));
            }
        }
    }

    /// Decomposes the documented dispersed example
    #[test]
    fn decomposes_the_documented_dispersed_example() {
        let e: Uuid = "c8c9cef9-7a7f-bd53-7a50-013e4e2afbde".parse().unwrap();
        let d = Decomposed::from(e);
        assert_eq!(d.process_id(), Some(31_359));
        assert_eq!(d.mac_fragment(), Some([0, 0, 0xd, 0x53, 0x7a, 0x50]));
        assert_eq!(d.unix_ts_ms(), Some(1_367_111_039_966));
        #[cfg(feature = "std")]
        assert_eq!(
            d.timestamp(),
            Some(std::time::UNIX_EPOCH + std::time::Duration::from_millis(1_367_111_039_966))
        );
    }

    /// Reports foreign versions without other fields
    #[test]
    fn reports_foreign_versions_without_other_fields() {
        let cases = [
            ("2ca4b2ce-6c13-40d4-bccf-37d222820f6f", 4),
            ("37f9f6ce-190a-11e9-9d6a-0242ac1c0002", 1),
            ("1e9190a3-7f9f-66ce-9d6a-0242ac1c0002", 6),
            ("01809424-3e59-7c05-9219-566f82fff672", 7),
            ("00000000-0000-0000-0000-000000000000", 0),
            ("ffffffff-ffff-ffff-ffff-ffffffffffff", 0xf),
        ];
        for (text, version) in cases {
            let d = text.parse::<Uuid>().unwrap().decompose();
            assert_eq!(d.version_marker(), version);
            assert_eq!(d.process_id(), None);
            assert_eq!(d.mac_fragment(), None);
            assert_eq!(d.unix_ts_ms(), None);
        }
    }

    /// Decomposes any value carrying the marker
    #[test]
    fn decomposes_any_value_carrying_the_marker() {
        let d = "00000000-0000-b000-0000-000000000000"
            .parse::<Uuid>()
            .unwrap()
            .decompose();
        assert_eq!(d.process_id(), Some(0));
        assert_eq!(d.mac_fragment(), Some([0; 6]));
        assert_eq!(d.unix_ts_ms(), Some(0));
    }
}
