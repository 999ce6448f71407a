//! CAN bus error reports.

use alloc::vec;

use crate::Result;
use crate::frame::{Frame, require_payload};
use crate::raw::RawFrame;
use crate::types::{CanCommState, CanLastErr, FrameType};

/// Error detected on the bus of a stream input session.
///
/// The interface only reports these when bus errors are routed into the
/// input stream.
///
/// # Payload layout
///
/// | Byte | Decoded into | Encoded from |
/// |------|--------------|--------------|
/// | 0    | `state`      | `state` |
/// | 1    | `tcvr_err` (non-zero) and `bus_err` | `tcvr_err` as 0/1 |
/// | 2    | unused       | `bus_err` |
/// | 3    | `tx_err_count` | `tx_err_count` |
/// | 4    | `rx_err_count` | `rx_err_count` |
///
/// Decoding takes `bus_err` from byte 1, the same byte as `tcvr_err`, while
/// encoding writes it to byte 2. Captures recorded by the driver decode the
/// same way as in the vendor's own binding.
// TODO: confirm with the driver documentation whether `bus_err` lives in byte 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanBusErrorFrame {
    /// Absolute time when the bus error occurred.
    pub timestamp: u64,
    /// Communication state.
    pub state: CanCommState,
    /// True if the transceiver reports an error (NERR pin).
    pub tcvr_err: bool,
    /// Last error.
    pub bus_err: CanLastErr,
    /// Transmit error counter.
    pub tx_err_count: u8,
    /// Receive error counter.
    pub rx_err_count: u8,
}

impl CanBusErrorFrame {
    /// Payload bytes a bus error record must carry.
    pub const PAYLOAD_LEN: usize = 5;

    /// Create a bus error frame.
    pub fn new(
        timestamp: u64,
        state: CanCommState,
        tcvr_err: bool,
        bus_err: CanLastErr,
        tx_err_count: u8,
        rx_err_count: u8,
    ) -> Self {
        Self {
            timestamp,
            state,
            tcvr_err,
            bus_err,
            tx_err_count,
            rx_err_count,
        }
    }
}

impl Frame for CanBusErrorFrame {
    fn from_raw(raw: RawFrame) -> Result<Self> {
        require_payload(&raw, Self::PAYLOAD_LEN)?;
        let payload = &raw.payload;
        Ok(Self {
            timestamp: raw.timestamp,
            state: CanCommState::from_u8(payload[0])?,
            tcvr_err: payload[1] != 0,
            bus_err: CanLastErr::from_u8(payload[1])?,
            tx_err_count: payload[3],
            rx_err_count: payload[4],
        })
    }

    fn to_raw(&self) -> Result<RawFrame> {
        let payload = vec![
            self.state.to_u8(),
            u8::from(self.tcvr_err),
            self.bus_err.to_u8(),
            self.tx_err_count,
            self.rx_err_count,
        ];
        Ok(RawFrame::new(self.timestamp, 0, FrameType::CanBusError, payload))
    }

    fn frame_type(&self) -> FrameType {
        FrameType::CanBusError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_from_raw_reads_byte_one_twice() {
        let raw = RawFrame::new(0x64, 0, FrameType::CanBusError, vec![0, 1, 2, 3, 4]);
        let frame = CanBusErrorFrame::from_raw(raw).unwrap();
        assert_eq!(
            frame,
            CanBusErrorFrame::new(0x64, CanCommState::ErrorActive, true, CanLastErr::Stuff, 3, 4)
        );
    }

    #[test]
    fn test_to_raw_layout() {
        let frame = CanBusErrorFrame::new(100, CanCommState::BusOff, true, CanLastErr::Stuff, 1, 2);
        let raw = frame.to_raw().unwrap();
        assert_eq!(raw.timestamp, 100);
        assert_eq!(raw.identifier, 0);
        assert_eq!(raw.frame_type, FrameType::CanBusError);
        assert_eq!((raw.flags, raw.info), (0, 0));
        assert_eq!(raw.payload, vec![2, 1, 1, 1, 2]);
    }

    #[test]
    fn test_short_payload() {
        let raw = RawFrame::new(1, 0, FrameType::CanBusError, vec![0, 1, 2, 3]);
        assert_eq!(
            CanBusErrorFrame::from_raw(raw),
            Err(Error::InsufficientPayload {
                frame_type: 0x02,
                needed: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_undefined_state() {
        let raw = RawFrame::new(1, 0, FrameType::CanBusError, vec![9, 0, 0, 0, 0]);
        assert_eq!(
            CanBusErrorFrame::from_raw(raw),
            Err(Error::UndefinedEnumValue {
                name: "CanCommState",
                value: 9
            })
        );
    }
}
