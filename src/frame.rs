//! The frame capability and the typed frame sum type.
//!
//! Every frame type converts to and from [`RawFrame`] through the [`Frame`]
//! trait. [`XnetFrame`] picks the right variant from the record's type tag:
//!
//! | Type tag | Variant |
//! |----------|---------|
//! | CAN data, CAN 2.0, CAN FD, CAN FD+BRS, CAN remote | [`XnetFrame::Can`] |
//! | CAN bus error | [`XnetFrame::CanBusError`] |
//! | Delay | [`XnetFrame::Delay`] |
//! | Log trigger | [`XnetFrame::LogTrigger`] |
//! | Start trigger | [`XnetFrame::StartTrigger`] |
//!
//! Every other tag is rejected with [`Error::UnsupportedFrameType`].
//!
//! # Example
//!
//! ```
//! use nixnet_rs::{Frame, FrameType, RawFrame, XnetFrame, DelayFrame};
//!
//! let raw = RawFrame::new(250, 0, FrameType::SpecialDelay, vec![]);
//! assert_eq!(XnetFrame::from_raw(raw)?, XnetFrame::Delay(DelayFrame::new(250)));
//! # Ok::<(), nixnet_rs::Error>(())
//! ```

use core::fmt;
use core::marker::PhantomData;

use alloc::vec::Vec;

use crate::can::{CanBusErrorFrame, CanFrame};
use crate::raw::{self, RawFrame, RawFrameIter};
use crate::special::{DelayFrame, LogTriggerFrame, StartTriggerFrame};
use crate::types::FrameType;
use crate::{Error, Result};

/// A frame that converts to and from the Raw Frame Format.
pub trait Frame: Sized {
    /// Convert from a raw record.
    fn from_raw(raw: RawFrame) -> Result<Self>;

    /// Convert to a raw record.
    fn to_raw(&self) -> Result<RawFrame>;

    /// Frame type tag this frame is written with.
    fn frame_type(&self) -> FrameType;
}

/// Fail with [`Error::InsufficientPayload`] if `raw` has fewer than `needed`
/// payload bytes.
#[inline]
pub(crate) fn require_payload(raw: &RawFrame, needed: usize) -> Result<()> {
    if raw.payload.len() < needed {
        return Err(Error::InsufficientPayload {
            frame_type: raw.frame_type.to_u8(),
            needed,
            actual: raw.payload.len(),
        });
    }
    Ok(())
}

/// Any frame this crate can type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XnetFrame {
    /// CAN data, remote or FD frame.
    Can(CanFrame),
    /// CAN bus error report.
    CanBusError(CanBusErrorFrame),
    /// Replay delay.
    Delay(DelayFrame),
    /// Log trigger event.
    LogTrigger(LogTriggerFrame),
    /// Session start event.
    StartTrigger(StartTriggerFrame),
}

impl Frame for XnetFrame {
    fn from_raw(raw: RawFrame) -> Result<Self> {
        match raw.frame_type {
            FrameType::CanData
            | FrameType::Can20Data
            | FrameType::CanFdData
            | FrameType::CanFdBrsData
            | FrameType::CanRemote => CanFrame::from_raw(raw).map(Self::Can),
            FrameType::CanBusError => CanBusErrorFrame::from_raw(raw).map(Self::CanBusError),
            FrameType::SpecialDelay => DelayFrame::from_raw(raw).map(Self::Delay),
            FrameType::SpecialLogTrigger => LogTriggerFrame::from_raw(raw).map(Self::LogTrigger),
            FrameType::SpecialStartTrigger => {
                StartTriggerFrame::from_raw(raw).map(Self::StartTrigger)
            }
            FrameType::FlexRayData
            | FrameType::FlexRayNull
            | FrameType::FlexRaySymbol
            | FrameType::LinData
            | FrameType::LinBusError
            | FrameType::LinNoResponse
            | FrameType::J1939Data => Err(Error::UnsupportedFrameType(raw.frame_type.to_u8())),
        }
    }

    fn to_raw(&self) -> Result<RawFrame> {
        match self {
            Self::Can(frame) => frame.to_raw(),
            Self::CanBusError(frame) => frame.to_raw(),
            Self::Delay(frame) => frame.to_raw(),
            Self::LogTrigger(frame) => frame.to_raw(),
            Self::StartTrigger(frame) => frame.to_raw(),
        }
    }

    fn frame_type(&self) -> FrameType {
        match self {
            Self::Can(frame) => frame.frame_type(),
            Self::CanBusError(frame) => frame.frame_type(),
            Self::Delay(frame) => frame.frame_type(),
            Self::LogTrigger(frame) => frame.frame_type(),
            Self::StartTrigger(frame) => frame.frame_type(),
        }
    }
}

impl From<CanFrame> for XnetFrame {
    fn from(frame: CanFrame) -> Self {
        Self::Can(frame)
    }
}

impl From<CanBusErrorFrame> for XnetFrame {
    fn from(frame: CanBusErrorFrame) -> Self {
        Self::CanBusError(frame)
    }
}

impl From<DelayFrame> for XnetFrame {
    fn from(frame: DelayFrame) -> Self {
        Self::Delay(frame)
    }
}

impl From<LogTriggerFrame> for XnetFrame {
    fn from(frame: LogTriggerFrame) -> Self {
        Self::LogTrigger(frame)
    }
}

impl From<StartTriggerFrame> for XnetFrame {
    fn from(frame: StartTriggerFrame) -> Self {
        Self::StartTrigger(frame)
    }
}

/// Iterator converting the records of a buffer into typed frames.
///
/// Ends after the first error, like [`RawFrameIter`].
pub struct FrameIter<F, B> {
    raw: RawFrameIter<B>,
    failed: bool,
    _frame: PhantomData<fn() -> F>,
}

impl<F: Frame, B: AsRef<[u8]>> FrameIter<F, B> {
    /// Type the records yielded by `raw`.
    pub fn new(raw: RawFrameIter<B>) -> Self {
        Self {
            raw,
            failed: false,
            _frame: PhantomData,
        }
    }
}

impl<F: Frame, B: AsRef<[u8]>> Iterator for FrameIter<F, B> {
    type Item = Result<F>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.raw.next()?.and_then(F::from_raw);
        self.failed = result.is_err();
        Some(result)
    }
}

impl<F, B> fmt::Debug for FrameIter<F, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameIter")
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

/// Decode a Raw Frame Format buffer straight into typed frames.
pub fn decode_frames<F: Frame>(buffer: &[u8]) -> FrameIter<F, &[u8]> {
    FrameIter::new(raw::decode_all(buffer))
}

/// Encode typed frames into one Raw Frame Format buffer, preserving order.
pub fn encode_frames<'a, F, I>(frames: I) -> Result<Vec<u8>>
where
    F: Frame + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut out = Vec::new();
    for frame in frames {
        raw::encode_into(&frame.to_raw()?, &mut out)?;
    }
    Ok(out)
}
