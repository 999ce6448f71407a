//! Shared enumerations and bit constants of the Raw Frame Format.
//!
//! These types are available without `std`, so they can be used when
//! decoding captures on embedded targets.

use crate::{Error, Result};

/// Flag bit set in [`crate::RawFrame::flags`] when the record is the
/// hardware's echo of a frame this session transmitted.
pub const FRAME_FLAGS_TRANSMIT_ECHO: u8 = 0x80;

/// Bit of the raw 32-bit identifier marking a 29-bit (extended) CAN identifier.
pub const FRAME_ID_CAN_IS_EXTENDED: u32 = 0x2000_0000;

/// Frame type tag stored in byte 12 of every raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FrameType {
    /// CAN data frame, classic or FD depending on the interface mode.
    CanData = 0x00,
    /// CAN remote frame.
    CanRemote = 0x01,
    /// CAN bus error report.
    CanBusError = 0x02,
    /// CAN 2.0 data frame on an FD capable interface.
    Can20Data = 0x08,
    /// CAN FD data frame without bit rate switch.
    CanFdData = 0x10,
    /// CAN FD data frame with bit rate switch.
    CanFdBrsData = 0x18,
    /// FlexRay data frame.
    FlexRayData = 0x20,
    /// FlexRay null frame.
    FlexRayNull = 0x21,
    /// FlexRay symbol.
    FlexRaySymbol = 0x22,
    /// LIN data frame.
    LinData = 0x40,
    /// LIN bus error report.
    LinBusError = 0x41,
    /// LIN header without response.
    LinNoResponse = 0x42,
    /// J1939 data frame.
    J1939Data = 0xC0,
    /// Replay delay pseudo-frame.
    SpecialDelay = 0xE1,
    /// Log trigger pseudo-frame.
    SpecialLogTrigger = 0xE2,
    /// Start trigger pseudo-frame.
    SpecialStartTrigger = 0xE3,
}

impl FrameType {
    /// Convert a raw tag to a frame type.
    ///
    /// Returns [`Error::UnsupportedFrameType`] for tags outside the format.
    pub fn from_u8(value: u8) -> Result<Self> {
        let frame_type = match value {
            0x00 => FrameType::CanData,
            0x01 => FrameType::CanRemote,
            0x02 => FrameType::CanBusError,
            0x08 => FrameType::Can20Data,
            0x10 => FrameType::CanFdData,
            0x18 => FrameType::CanFdBrsData,
            0x20 => FrameType::FlexRayData,
            0x21 => FrameType::FlexRayNull,
            0x22 => FrameType::FlexRaySymbol,
            0x40 => FrameType::LinData,
            0x41 => FrameType::LinBusError,
            0x42 => FrameType::LinNoResponse,
            0xC0 => FrameType::J1939Data,
            0xE1 => FrameType::SpecialDelay,
            0xE2 => FrameType::SpecialLogTrigger,
            0xE3 => FrameType::SpecialStartTrigger,
            other => return Err(Error::UnsupportedFrameType(other)),
        };
        Ok(frame_type)
    }

    /// Raw tag of this frame type.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns true for the tags that carry a CAN data or remote frame.
    #[inline]
    pub const fn is_can_data(self) -> bool {
        matches!(
            self,
            FrameType::CanData
                | FrameType::Can20Data
                | FrameType::CanFdData
                | FrameType::CanFdBrsData
                | FrameType::CanRemote
        )
    }
}

impl TryFrom<u8> for FrameType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_u8(value)
    }
}

impl From<FrameType> for u8 {
    fn from(frame_type: FrameType) -> Self {
        frame_type.to_u8()
    }
}

/// CAN controller communication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CanCommState {
    /// Error counters are below 128; the node takes full part in communication.
    #[default]
    ErrorActive = 0,
    /// An error counter reached 128; the node only sends passive error flags.
    ErrorPassive = 1,
    /// The transmit error counter passed 255; the node is off the bus.
    BusOff = 2,
    /// The controller is initializing.
    Init = 3,
}

impl CanCommState {
    /// Convert a raw byte to a communication state.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::ErrorActive),
            1 => Ok(Self::ErrorPassive),
            2 => Ok(Self::BusOff),
            3 => Ok(Self::Init),
            other => Err(Error::UndefinedEnumValue {
                name: "CanCommState",
                value: other,
            }),
        }
    }

    /// Raw byte of this state.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Result of the last attempt to receive or transmit a CAN frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CanLastErr {
    /// No error.
    #[default]
    None = 0,
    /// More than 5 equal bits in a row.
    Stuff = 1,
    /// A fixed-form field contained an illegal bit.
    Form = 2,
    /// The transmitted frame was not acknowledged.
    Ack = 3,
    /// A recessive bit was sent but a dominant bit was read back.
    Bit1 = 4,
    /// A dominant bit was sent but a recessive bit was read back.
    Bit0 = 5,
    /// The received CRC did not match.
    Crc = 6,
}

impl CanLastErr {
    /// Convert a raw byte to a last error value.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Stuff),
            2 => Ok(Self::Form),
            3 => Ok(Self::Ack),
            4 => Ok(Self::Bit1),
            5 => Ok(Self::Bit0),
            6 => Ok(Self::Crc),
            other => Err(Error::UndefinedEnumValue {
                name: "CanLastErr",
                value: other,
            }),
        }
    }

    /// Raw byte of this error.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_type_tags() {
        assert_eq!(FrameType::from_u8(0x00), Ok(FrameType::CanData));
        assert_eq!(FrameType::from_u8(0x18), Ok(FrameType::CanFdBrsData));
        assert_eq!(FrameType::from_u8(0xE3), Ok(FrameType::SpecialStartTrigger));
        assert_eq!(FrameType::SpecialDelay.to_u8(), 0xE1);
        assert_eq!(
            FrameType::from_u8(0x03),
            Err(Error::UnsupportedFrameType(0x03))
        );
    }

    #[test]
    fn test_is_can_data() {
        assert!(FrameType::CanRemote.is_can_data());
        assert!(FrameType::Can20Data.is_can_data());
        assert!(!FrameType::CanBusError.is_can_data());
        assert!(!FrameType::LinData.is_can_data());
    }

    #[test]
    fn test_bus_error_enums() {
        assert_eq!(CanCommState::from_u8(2), Ok(CanCommState::BusOff));
        assert_eq!(CanLastErr::from_u8(6), Ok(CanLastErr::Crc));
        assert_eq!(
            CanLastErr::from_u8(7),
            Err(Error::UndefinedEnumValue {
                name: "CanLastErr",
                value: 7
            })
        );
    }
}
