//! Pseudo-frames that carry only a time value.
//!
//! These records never appear on the bus. They either instruct the interface
//! (a replay delay) or report an event (log and start triggers). Their
//! payload is empty.

use alloc::vec::Vec;

use crate::Result;
use crate::frame::Frame;
use crate::raw::RawFrame;
use crate::types::FrameType;

/// Delays the hardware when output in replay mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayFrame {
    /// Time to delay in milliseconds. Stored in the record's timestamp field.
    pub offset: u64,
}

impl DelayFrame {
    /// Create a delay of `offset` milliseconds.
    pub fn new(offset: u64) -> Self {
        Self { offset }
    }
}

impl Frame for DelayFrame {
    fn from_raw(raw: RawFrame) -> Result<Self> {
        Ok(Self::new(raw.timestamp))
    }

    fn to_raw(&self) -> Result<RawFrame> {
        Ok(RawFrame::new(self.offset, 0, FrameType::SpecialDelay, Vec::new()))
    }

    fn frame_type(&self) -> FrameType {
        FrameType::SpecialDelay
    }
}

/// Time when a rising edge was detected on the log trigger terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogTriggerFrame {
    /// Absolute time that the trigger occurred.
    pub timestamp: u64,
}

impl LogTriggerFrame {
    /// Create a log trigger event at `timestamp`.
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

impl Frame for LogTriggerFrame {
    fn from_raw(raw: RawFrame) -> Result<Self> {
        Ok(Self::new(raw.timestamp))
    }

    fn to_raw(&self) -> Result<RawFrame> {
        Ok(RawFrame::new(self.timestamp, 0, FrameType::SpecialLogTrigger, Vec::new()))
    }

    fn frame_type(&self) -> FrameType {
        FrameType::SpecialLogTrigger
    }
}

/// Time the stream input session started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartTriggerFrame {
    /// Absolute time that the trigger occurred.
    pub timestamp: u64,
}

impl StartTriggerFrame {
    /// Create a start trigger event at `timestamp`.
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

impl Frame for StartTriggerFrame {
    fn from_raw(raw: RawFrame) -> Result<Self> {
        Ok(Self::new(raw.timestamp))
    }

    fn to_raw(&self) -> Result<RawFrame> {
        Ok(RawFrame::new(self.timestamp, 0, FrameType::SpecialStartTrigger, Vec::new()))
    }

    fn frame_type(&self) -> FrameType {
        FrameType::SpecialStartTrigger
    }
}
