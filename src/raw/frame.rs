//! The wire-level frame record.

use alloc::vec::Vec;

use crate::Result;
use crate::frame::Frame;
use crate::types::FrameType;

/// One record of the Raw Frame Format.
///
/// Every typed frame converts to and from this representation. The payload
/// length is implied by the record framing and must not exceed
/// [`crate::raw::MAX_PAYLOAD_LEN`]; longer payloads are rejected by the codec
/// instead of being truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawFrame {
    /// Absolute time the interface received the end of frame, in driver ticks.
    pub timestamp: u64,
    /// Raw arbitration field, including the extended-identifier bit.
    pub identifier: u32,
    /// Frame type tag.
    pub frame_type: FrameType,
    /// Flags that qualify the type.
    pub flags: u8,
    /// Info byte that qualifies the type.
    pub info: u8,
    /// Payload bytes.
    pub payload: Vec<u8>,
}

impl RawFrame {
    /// Create a raw frame with zero flags and info.
    pub fn new(timestamp: u64, identifier: u32, frame_type: FrameType, payload: Vec<u8>) -> Self {
        Self {
            timestamp,
            identifier,
            frame_type,
            flags: 0,
            info: 0,
            payload,
        }
    }

    /// Set the flags byte.
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    /// Set the info byte.
    pub fn with_info(mut self, info: u8) -> Self {
        self.info = info;
        self
    }

    /// Number of bytes this frame occupies once encoded, padding included.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        super::record_size(self.payload.len())
    }
}

impl Frame for RawFrame {
    fn from_raw(raw: RawFrame) -> Result<Self> {
        Ok(raw)
    }

    fn to_raw(&self) -> Result<RawFrame> {
        Ok(self.clone())
    }

    fn frame_type(&self) -> FrameType {
        self.frame_type
    }
}
