//! Error types.

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseError;

/// Error building a [`NodeContext`](crate::NodeContext) from the host environment.
///
/// Returned by [`NodeContext::discover`](crate::NodeContext::discover) when an override
/// environment variable is malformed.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NodeContextError {
    /// The process id override is not a decimal integer.
    #[error("invalid process id override: {value:?}")]
    InvalidProcessId {
        /// The rejected value.
        value: String,
    },

    /// The hardware address override is not six hex octets.
    #[error("invalid hardware address override: {value:?}")]
    InvalidMacAddress {
        /// The rejected value.
        value: String,
    },

    /// An override variable is set but does not hold valid Unicode.
    #[error("environment variable {var} is not valid unicode")]
    NotUnicode {
        /// The name of the variable.
        var: &'static str,
    },
}
