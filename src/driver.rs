//! The narrow call interface to the vendor driver.
//!
//! Frame codecs and collections never talk to hardware directly. They go
//! through an implementation of [`Driver`], which owns the session handles,
//! the queues and the timeouts. [`crate::session::LoopbackDriver`] is an
//! in-memory implementation for tests and offline processing.
//!
//! Every method takes `&self`: if one driver is shared between threads, the
//! implementation serializes access.

use core::fmt;
use core::time::Duration;

use alloc::string::String;
use alloc::vec::Vec;

use crate::Result;

/// Session handle issued by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handle(pub u32);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How long a read or write may block inside the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeout {
    /// Do not wait. Reads return what is available; writes fail if the
    /// data cannot be queued immediately.
    #[default]
    None,
    /// Wait up to the given duration.
    Finite(Duration),
    /// Wait until the operation completes.
    Infinite,
}

impl Timeout {
    /// Default timeout of queued writes.
    pub const WRITE_DEFAULT: Timeout = Timeout::Finite(Duration::from_secs(10));

    /// Wait up to `secs` seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Timeout::Finite(Duration::from_secs(secs))
    }

    /// Encoding used by the driver API: `0.0` for none, `-1.0` for infinite,
    /// otherwise seconds.
    pub fn as_seconds(&self) -> f64 {
        match self {
            Timeout::None => 0.0,
            Timeout::Finite(duration) => duration.as_secs_f64(),
            Timeout::Infinite => -1.0,
        }
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            Timeout::None
        } else {
            Timeout::Finite(duration)
        }
    }
}

/// Session item property written through [`Driver::set_property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyId {
    /// Time between session start and the first transmission of a frame, in seconds.
    CanStartTimeOffset,
    /// Time between cyclic transmissions of a frame, in seconds.
    CanTxTime,
    /// Number of upcoming cyclic transmissions to skip.
    SkipNCyclicFrames,
    /// Output queue update frequency.
    OutputQueueUpdateFreq,
    /// Number of upcoming LIN transmissions sent with a corrupted checksum.
    LinTxNCorruptedChecksums,
    /// Decimal source address accepted for a J1939 PGN; empty clears the filter.
    J1939AddressFilter,
}

/// Value written to a [`PropertyId`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    F64(f64),
    U32(u32),
    String(String),
}

/// Operations the driver provides to this crate.
pub trait Driver {
    /// Read at most `max_bytes` of Raw Frame Format data.
    ///
    /// Implementations return whole records only, so the result may be
    /// shorter than `max_bytes` even when more data is queued.
    fn read_frame(&self, handle: Handle, max_bytes: usize, timeout: Timeout) -> Result<Vec<u8>>;

    /// Queue Raw Frame Format data for transmission.
    ///
    /// Must be atomic: on [`crate::Error::Timeout`] or any other error none
    /// of the bytes are queued, so the caller may submit them again.
    fn write_frame(&self, handle: Handle, bytes: &[u8], timeout: Timeout) -> Result<()>;

    /// Number of items in the session's list.
    fn item_count(&self, handle: Handle) -> Result<usize>;

    /// Names of the items in the session's list, in list order.
    fn item_names(&self, handle: Handle) -> Result<Vec<String>>;

    /// Write a property of the item at `index`.
    fn set_property(
        &self,
        handle: Handle,
        index: usize,
        property: PropertyId,
        value: PropertyValue,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_encoding() {
        assert_eq!(Timeout::None.as_seconds(), 0.0);
        assert_eq!(Timeout::Infinite.as_seconds(), -1.0);
        assert_eq!(Timeout::WRITE_DEFAULT.as_seconds(), 10.0);
        assert_eq!(Timeout::from(Duration::from_millis(500)).as_seconds(), 0.5);
        assert_eq!(Timeout::from(Duration::ZERO), Timeout::None);
    }
}
