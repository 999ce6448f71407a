//! Error types for frame codec, collection and session operations.
//!
//! This module defines the [`Error`] enum which represents every failure the
//! crate can report. Codec errors are returned at the point of the failing
//! conversion and are never retried internally.
//!
//! # Example
//!
//! ```
//! use nixnet_rs::{CanIdentifier, Error};
//!
//! let id = CanIdentifier::new(0x500, false);
//! match id.to_raw() {
//!     Err(Error::UndefinedFrameIdentifier { identifier, extended }) => {
//!         assert_eq!(identifier, 0x500);
//!         assert!(!extended);
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use core::fmt;

use alloc::string::String;

/// Errors that can occur while converting frames or resolving items.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A record header or its payload extends past the end of the buffer.
    TruncatedRecord {
        /// Offset of the record within the buffer
        offset: usize,
        /// Number of bytes the record needs from `offset`
        needed: usize,
        /// Number of bytes left in the buffer from `offset`
        available: usize,
    },

    /// A payload is longer than the Raw Frame Format allows.
    PayloadTooLarge {
        /// Payload length that was supplied or declared
        len: usize,
        /// Maximum payload length of the format
        max: usize,
    },

    /// A typed frame needs more payload bytes than the raw record carries.
    InsufficientPayload {
        /// Raw type tag of the record
        frame_type: u8,
        /// Minimum payload length the variant requires
        needed: usize,
        /// Payload length found in the record
        actual: usize,
    },

    /// The type tag is unknown, or known but has no typed frame variant.
    UnsupportedFrameType(u8),

    /// The identifier does not fit in its standard or extended width.
    UndefinedFrameIdentifier {
        /// Identifier value as given by the caller
        identifier: u32,
        /// Whether the identifier claimed to be extended
        extended: bool,
    },

    /// A byte does not map to any value of the named enumeration.
    UndefinedEnumValue {
        /// Enumeration the value was decoded into
        name: &'static str,
        /// Offending raw value
        value: u8,
    },

    /// A collection key is neither a position nor a name.
    InvalidKeyType(String),

    /// No item with the given name exists in the collection.
    KeyNotFound(String),

    /// A position lies outside the collection.
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Number of cached items
        len: usize,
    },

    /// The driver's live item count disagrees with the cached name list.
    ///
    /// This means the driver-side list changed after it was cached and is a
    /// contract breach by the driver, not a recoverable user error.
    CacheConsistencyViolation {
        /// Item count reported by the driver
        count: usize,
        /// Cached item names
        names: alloc::vec::Vec<String>,
    },

    /// The driver's bounded wait elapsed. Nothing was queued or consumed.
    Timeout,

    /// Any other status reported by the driver.
    Driver {
        /// Driver status code
        code: i32,
        /// Driver supplied description
        description: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TruncatedRecord {
                offset,
                needed,
                available,
            } => write!(
                f,
                "Truncated record at offset {offset}: need {needed} bytes, got {available}"
            ),
            Error::PayloadTooLarge { len, max } => {
                write!(f, "Payload of {len} bytes exceeds the maximum of {max}")
            }
            Error::InsufficientPayload {
                frame_type,
                needed,
                actual,
            } => write!(
                f,
                "Frame type {frame_type:#04x} needs {needed} payload bytes, got {actual}"
            ),
            Error::UnsupportedFrameType(tag) => write!(f, "Unsupported frame type {tag:#04x}"),
            Error::UndefinedFrameIdentifier {
                identifier,
                extended,
            } => {
                let width = if *extended { "extended" } else { "standard" };
                write!(f, "Undefined {width} frame identifier {identifier:#x}")
            }
            Error::UndefinedEnumValue { name, value } => {
                write!(f, "Undefined {name} value {value}")
            }
            Error::InvalidKeyType(key) => write!(f, "Invalid collection key type: {key}"),
            Error::KeyNotFound(name) => write!(f, "No item named {name:?}"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "Index {index} out of range for collection of {len} items")
            }
            Error::CacheConsistencyViolation { count, names } => write!(
                f,
                "Item count ({count}) is out of sync with cached items ({names:?})"
            ),
            Error::Timeout => write!(f, "Driver operation timed out"),
            Error::Driver { code, description } => {
                write!(f, "Driver error {code}: {description}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A specialized Result type for frame and collection operations.
///
/// This is defined as `core::result::Result<T, Error>` for convenience.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        let err = Error::UndefinedFrameIdentifier {
            identifier: 0x500,
            extended: false,
        };
        assert_eq!(err.to_string(), "Undefined standard frame identifier 0x500");

        let err = Error::UnsupportedFrameType(0x20);
        assert_eq!(err.to_string(), "Unsupported frame type 0x20");

        let err = Error::IndexOutOfRange { index: 3, len: 3 };
        assert!(err.to_string().contains("Index 3"));
    }
}
