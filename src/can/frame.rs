//! CAN data and remote frames.

use alloc::vec::Vec;

use super::CanIdentifier;
use crate::Result;
use crate::frame::Frame;
use crate::raw::RawFrame;
use crate::types::{FRAME_FLAGS_TRANSMIT_ECHO, FrameType};

/// CAN frame.
///
/// `echo` and `timestamp` are filled in by reads; a freshly constructed frame
/// has both cleared.
///
/// ```
/// use nixnet_rs::{CanFrame, CanIdentifier, Frame, FrameType};
///
/// let frame = CanFrame::new(CanIdentifier::extended(1), FrameType::CanData, vec![0x11]);
/// let raw = frame.to_raw()?;
/// assert_eq!(raw.identifier, 0x2000_0001);
/// assert_eq!(raw.flags, 0);
/// assert_eq!(CanFrame::from_raw(raw)?, frame);
/// # Ok::<(), nixnet_rs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanFrame {
    /// Arbitration identifier.
    pub identifier: CanIdentifier,
    /// True if the frame is the echo of a successful transmit rather than a
    /// frame received from the network.
    pub echo: bool,
    /// Frame type.
    pub frame_type: FrameType,
    /// Absolute time the interface received the end of frame.
    pub timestamp: u64,
    /// Payload bytes.
    pub payload: Vec<u8>,
}

impl CanFrame {
    /// Create a frame for transmission.
    pub fn new(
        identifier: impl Into<CanIdentifier>,
        frame_type: FrameType,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            echo: false,
            frame_type,
            timestamp: 0,
            payload,
        }
    }

    /// Create a [`FrameType::CanData`] frame.
    pub fn data(identifier: impl Into<CanIdentifier>, payload: &[u8]) -> Self {
        Self::new(identifier, FrameType::CanData, payload.to_vec())
    }

    /// Returns true for remote frames.
    #[inline]
    pub fn is_remote(&self) -> bool {
        self.frame_type == FrameType::CanRemote
    }
}

impl Frame for CanFrame {
    fn from_raw(raw: RawFrame) -> Result<Self> {
        Ok(Self {
            identifier: CanIdentifier::from_raw(raw.identifier),
            echo: raw.flags & FRAME_FLAGS_TRANSMIT_ECHO != 0,
            frame_type: raw.frame_type,
            timestamp: raw.timestamp,
            payload: raw.payload,
        })
    }

    fn to_raw(&self) -> Result<RawFrame> {
        let identifier = self.identifier.to_raw()?;
        let flags = if self.echo {
            FRAME_FLAGS_TRANSMIT_ECHO
        } else {
            0
        };
        let raw = RawFrame::new(
            self.timestamp,
            identifier,
            self.frame_type,
            self.payload.clone(),
        );
        Ok(raw.with_flags(flags))
    }

    fn frame_type(&self) -> FrameType {
        self.frame_type
    }
}

// ============================================================================
// embedded_can integration (requires `can` feature)
// ============================================================================

/// Classic CAN view of the frame. Only identifiers that fit the driver's
/// masks can be represented, and at most 8 payload bytes.
#[cfg(feature = "can")]
impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<embedded_can::Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        let id: embedded_can::Id = id.into();
        let identifier = CanIdentifier::from(id);
        identifier.to_raw().ok()?;
        Some(Self::data(identifier, data))
    }

    fn new_remote(id: impl Into<embedded_can::Id>, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }
        let id: embedded_can::Id = id.into();
        let identifier = CanIdentifier::from(id);
        identifier.to_raw().ok()?;
        Some(Self::new(identifier, FrameType::CanRemote, alloc::vec![0; dlc]))
    }

    fn is_extended(&self) -> bool {
        self.identifier.extended
    }

    fn is_remote_frame(&self) -> bool {
        self.is_remote()
    }

    fn id(&self) -> embedded_can::Id {
        // Fields are public, so fall back to masking instead of panicking.
        embedded_can::Id::try_from(self.identifier).unwrap_or_else(|_| {
            let raw = self.identifier.identifier;
            if self.identifier.extended {
                embedded_can::ExtendedId::new(raw & super::EXTENDED_FRAME_ID_MASK)
                    .map(embedded_can::Id::Extended)
                    .unwrap_or(embedded_can::Id::Extended(embedded_can::ExtendedId::ZERO))
            } else {
                embedded_can::StandardId::new((raw & super::FRAME_ID_MASK) as u16)
                    .map(embedded_can::Id::Standard)
                    .unwrap_or(embedded_can::Id::Standard(embedded_can::StandardId::ZERO))
            }
        })
    }

    fn dlc(&self) -> usize {
        self.payload.len()
    }

    fn data(&self) -> &[u8] {
        if self.is_remote() {
            &[]
        } else {
            &self.payload
        }
    }
}
