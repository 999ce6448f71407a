//! The NI-XNET Raw Frame Format.
//!
//! The Raw Frame Format is the byte stream the driver hands out on reads and
//! accepts on writes. It is a concatenation of fixed-layout records:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0      | 8    | timestamp (u64, little-endian) |
//! | 8      | 4    | identifier (u32, little-endian, extended flag in bit 29) |
//! | 12     | 1    | frame type tag |
//! | 13     | 1    | flags |
//! | 14     | 1    | info |
//! | 15     | 1    | payload length |
//! | 16     | n    | payload, zero padded to the record stride |
//!
//! A record is at least one base unit of 24 bytes. Payloads longer than
//! 8 bytes take additional 8-byte units.
//!
//! # Example
//!
//! ```
//! use nixnet_rs::raw::{decode_all, encode_all, RawFrame};
//! use nixnet_rs::FrameType;
//!
//! let frames = vec![
//!     RawFrame::new(1, 0x100, FrameType::CanData, vec![1, 2, 3]),
//!     RawFrame::new(2, 0x200, FrameType::CanFdData, vec![0xAA; 12]),
//! ];
//! let bytes = encode_all(&frames)?;
//! assert_eq!(bytes.len(), 24 + 32);
//!
//! let decoded = decode_all(&bytes).collect::<nixnet_rs::Result<Vec<_>>>()?;
//! assert_eq!(decoded, frames);
//! # Ok::<(), nixnet_rs::Error>(())
//! ```

mod codec;
mod frame;

pub use codec::{RawFrameIter, decode_all, decode_one, encode_all, encode_into, encode_one};
pub use frame::RawFrame;

/// Size of the fixed record header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Payload bytes carried by the base unit.
pub const BASE_UNIT_PAYLOAD_LEN: usize = 8;

/// Size of the smallest record in bytes.
pub const BASE_UNIT_SIZE: usize = HEADER_SIZE + BASE_UNIT_PAYLOAD_LEN;

/// Maximum payload length accepted by the codec (CAN FD).
pub const MAX_PAYLOAD_LEN: usize = 64;

/// Size of an encoded record carrying `payload_len` payload bytes.
#[inline]
pub const fn record_size(payload_len: usize) -> usize {
    let units = if payload_len <= BASE_UNIT_PAYLOAD_LEN {
        1
    } else {
        payload_len.div_ceil(BASE_UNIT_PAYLOAD_LEN)
    };
    HEADER_SIZE + units * BASE_UNIT_PAYLOAD_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_size() {
        assert_eq!(record_size(0), 24);
        assert_eq!(record_size(8), 24);
        assert_eq!(record_size(9), 32);
        assert_eq!(record_size(16), 32);
        assert_eq!(record_size(17), 40);
        assert_eq!(record_size(64), 80);
    }
}
