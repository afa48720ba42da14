//! Process identity embedded in the shard layouts.

/// The 4-bit version marker written to the high nibble of byte 6 by the shard layouts.
///
/// It is distinct from the standard UUID versions (1 through 8), so identifiers produced by this
/// crate can be told apart from, e.g., random UUIDv4 values stored in the same column.
pub const VERSION_MARKER: u8 = 0xb;

/// The process id and hardware address of the generating node, fixed for the process lifetime.
///
/// Build one with [`NodeContext::new`] when the values come from elsewhere (e.g., a container
/// orchestrator), or with [`NodeContext::discover`] to read them from the host.
///
/// # Examples
///
/// ```rust
/// use shard_uuid::NodeContext;
///
/// let node = NodeContext::new(70_000, [0x02, 0x42, 0xac, 0x1c, 0x00, 0x02]);
/// assert_eq!(node.process_id(), (70_000_u32 % 65_536) as u16);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct NodeContext {
    process_id: u16,
    mac_address: [u8; 6],
}

impl NodeContext {
    /// Creates a context from a raw process id, reduced modulo 65536, and a hardware address.
    ///
    /// Pass an all-zero `mac_address` when the node has no usable network interface.
    pub const fn new(process_id: u32, mac_address: [u8; 6]) -> Self {
        Self {
            process_id: process_id as u16,
            mac_address,
        }
    }

    /// Returns the process id, in the range `0..65536`.
    pub const fn process_id(&self) -> u16 {
        self.process_id
    }

    /// Returns the 6-byte hardware address; only the low 28 bits are written to identifiers.
    pub const fn mac_address(&self) -> &[u8; 6] {
        &self.mac_address
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod discovery {
    use std::{env, process};

    use super::NodeContext;
    use crate::error::NodeContextError;

    /// Environment variable that overrides the host process id (decimal).
    pub const PROCESS_ID_ENV: &str = "SHARD_UUID_PROCESS_ID";

    /// Environment variable that overrides the hardware address (`aa:bb:cc:dd:ee:ff`).
    pub const MAC_ADDRESS_ENV: &str = "SHARD_UUID_MAC_ADDRESS";

    impl NodeContext {
        /// Reads the process id and the hardware address from the host.
        ///
        /// The [`PROCESS_ID_ENV`] and [`MAC_ADDRESS_ENV`] variables take precedence when set,
        /// which is handy where every container runs as process 1. Without an override, the
        /// hardware address is that of the first interface reporting a non-zero address; when
        /// none does, an all-zero address is used and no error is raised.
        ///
        /// # Errors
        ///
        /// Returns an error if an override is set but cannot be parsed.
        pub fn discover() -> Result<Self, NodeContextError> {
            let process_id = match read_var(PROCESS_ID_ENV)? {
                Some(value) => parse_process_id(&value)?,
                None => process::id(),
            };
            let mac_address = match read_var(MAC_ADDRESS_ENV)? {
                Some(value) => parse_mac_address(&value)?,
                None => host_mac_address(),
            };

            let node = Self::new(process_id, mac_address);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                process_id = node.process_id(),
                mac_address = ?node.mac_address(),
                "discovered node context"
            );
            Ok(node)
        }
    }

    fn read_var(var: &'static str) -> Result<Option<String>, NodeContextError> {
        match env::var(var) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(NodeContextError::NotUnicode { var }),
        }
    }

    pub(crate) fn parse_process_id(value: &str) -> Result<u32, NodeContextError> {
        value
            .trim()
            .parse()
            .map_err(|_| NodeContextError::InvalidProcessId {
                value: value.to_owned(),
            })
    }

    /// Parses six hex octets separated by `:` or `-`.
    pub(crate) fn parse_mac_address(value: &str) -> Result<[u8; 6], NodeContextError> {
        let err = || NodeContextError::InvalidMacAddress {
            value: value.to_owned(),
        };

        let mut dst = [0u8; 6];
        let mut octets = value.trim().split([':', '-']);
        for e in dst.iter_mut() {
            let octet = octets.next().ok_or_else(err)?;
            if octet.len() != 2 || !octet.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(err());
            }
            *e = u8::from_str_radix(octet, 16).map_err(|_| err())?;
        }
        if octets.next().is_some() {
            return Err(err());
        }
        Ok(dst)
    }

    /// Returns the first non-zero interface address, or zeros if there is none.
    fn host_mac_address() -> [u8; 6] {
        match mac_address::get_mac_address() {
            Ok(Some(mac)) => return mac.bytes(),
            Ok(None) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("no hardware address found; using zeros");
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "could not read hardware address; using zeros");
            }
        }
        [0; 6]
    }
}

#[cfg(feature = "std")]
pub use discovery::{MAC_ADDRESS_ENV, PROCESS_ID_ENV};
