//! Frame lists of a session and the views that move frames through them.

use core::fmt;
use core::ops::Deref;

use alloc::string::String;
use alloc::vec::Vec;

use crate::Result;
use crate::can::CanFrame;
use crate::collection::{Collection, CollectionItem, Item};
use crate::driver::{Driver, Handle, PropertyId, PropertyValue, Timeout};
use crate::frame::{Frame, FrameIter, XnetFrame};
use crate::raw::{self, BASE_UNIT_SIZE, RawFrame, RawFrameIter};

/// Frame collection of a session.
pub type Frames<'d, D> = Collection<'d, D, SessionFrame<'d, D>>;

// ============================================================================
// Session frame item
// ============================================================================

/// A frame listed in a session, with its writable properties.
pub struct SessionFrame<'d, D: ?Sized> {
    driver: &'d D,
    item: Item,
}

impl<'d, D: Driver + ?Sized> SessionFrame<'d, D> {
    /// Position, handle and name of the frame in the session list.
    #[inline]
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Name of the frame.
    #[inline]
    pub fn name(&self) -> &str {
        self.item.name()
    }

    /// Delay between session start and the first transmission, in seconds.
    pub fn set_can_start_time_off(&self, seconds: f64) -> Result<()> {
        self.set(PropertyId::CanStartTimeOffset, PropertyValue::F64(seconds))
    }

    /// Time between cyclic transmissions, in seconds.
    pub fn set_can_tx_time(&self, seconds: f64) -> Result<()> {
        self.set(PropertyId::CanTxTime, PropertyValue::F64(seconds))
    }

    /// Skip the next `count` cyclic transmissions.
    pub fn set_skip_n_cyclic_frames(&self, count: u32) -> Result<()> {
        self.set(PropertyId::SkipNCyclicFrames, PropertyValue::U32(count))
    }

    /// How often the output queue is refreshed.
    pub fn set_output_queue_update_freq(&self, frequency: u32) -> Result<()> {
        self.set(PropertyId::OutputQueueUpdateFreq, PropertyValue::U32(frequency))
    }

    /// Send the next `count` LIN transmissions with a corrupted checksum.
    pub fn set_lin_tx_n_corrupted_chksums(&self, count: u32) -> Result<()> {
        self.set(PropertyId::LinTxNCorruptedChecksums, PropertyValue::U32(count))
    }

    /// Accept only the given decimal J1939 source address. An empty string
    /// clears the filter.
    pub fn set_j1939_addr_filter(&self, address: &str) -> Result<()> {
        self.set(
            PropertyId::J1939AddressFilter,
            PropertyValue::String(String::from(address)),
        )
    }

    fn set(&self, property: PropertyId, value: PropertyValue) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Setting {:?} of frame {} on handle {} to {:?}",
            property,
            self.item.name(),
            self.item.handle(),
            value
        );
        self.driver
            .set_property(self.item.handle(), self.item.index(), property, value)
    }
}

impl<'d, D: ?Sized> CollectionItem<'d, D> for SessionFrame<'d, D> {
    fn create(driver: &'d D, handle: Handle, index: usize, name: &str) -> Self {
        Self {
            driver,
            item: Item::new(handle, index, name),
        }
    }
}

impl<D: ?Sized> PartialEq for SessionFrame<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl<D: ?Sized> fmt::Debug for SessionFrame<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionFrame").field(&self.item).finish()
    }
}

impl<D: ?Sized> fmt::Display for SessionFrame<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.item, f)
    }
}

// ============================================================================
// Shared read/write paths
// ============================================================================

fn read_bytes<D: Driver + ?Sized>(
    driver: &D,
    handle: Handle,
    max_bytes: usize,
    timeout: Timeout,
) -> Result<Vec<u8>> {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        "Reading up to {} bytes from handle {} (timeout {}s)",
        max_bytes,
        handle,
        timeout.as_seconds()
    );
    let bytes = driver.read_frame(handle, max_bytes, timeout)?;
    #[cfg(feature = "tracing")]
    tracing::debug!("Read {} bytes from handle {}", bytes.len(), handle);
    Ok(bytes)
}

fn read_raw<D: Driver + ?Sized>(
    driver: &D,
    handle: Handle,
    count: usize,
    timeout: Timeout,
) -> Result<RawFrameIter<Vec<u8>>> {
    let bytes = read_bytes(driver, handle, count.saturating_mul(BASE_UNIT_SIZE), timeout)?;
    Ok(RawFrameIter::new(bytes))
}

fn write_bytes<D: Driver + ?Sized>(
    driver: &D,
    handle: Handle,
    bytes: &[u8],
    timeout: Timeout,
) -> Result<()> {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Writing {} bytes to handle {} (timeout {}s)",
        bytes.len(),
        handle,
        timeout.as_seconds()
    );
    driver.write_frame(handle, bytes, timeout)
}

// ============================================================================
// Input views
// ============================================================================

/// Frames of a queued input session.
///
/// `count` arguments are numbers of frames; the byte budget handed to the
/// driver assumes every frame fits one base unit, so longer frames reduce the
/// number returned.
pub struct InFrames<'d, D: ?Sized> {
    frames: Frames<'d, D>,
}

impl<'d, D: Driver + ?Sized> InFrames<'d, D> {
    /// Create a view of the frames behind `handle`. No driver call is made.
    pub fn new(driver: &'d D, handle: Handle) -> Self {
        Self {
            frames: Frames::new(driver, handle),
        }
    }

    /// Read at most `max_bytes` of raw record bytes.
    pub fn read_bytes(&self, max_bytes: usize, timeout: Timeout) -> Result<Vec<u8>> {
        read_bytes(self.driver(), self.handle(), max_bytes, timeout)
    }

    /// Read up to `count` raw frames.
    pub fn read_raw(&self, count: usize, timeout: Timeout) -> Result<RawFrameIter<Vec<u8>>> {
        read_raw(self.driver(), self.handle(), count, timeout)
    }

    /// Read up to `count` CAN frames.
    pub fn read_can(
        &self,
        count: usize,
        timeout: Timeout,
    ) -> Result<FrameIter<CanFrame, Vec<u8>>> {
        self.read_raw(count, timeout).map(FrameIter::new)
    }

    /// Read up to `count` frames of any supported type.
    pub fn read_frames(
        &self,
        count: usize,
        timeout: Timeout,
    ) -> Result<FrameIter<XnetFrame, Vec<u8>>> {
        self.read_raw(count, timeout).map(FrameIter::new)
    }
}

impl<'d, D: ?Sized> Deref for InFrames<'d, D> {
    type Target = Frames<'d, D>;

    fn deref(&self) -> &Self::Target {
        &self.frames
    }
}

impl<D: ?Sized> fmt::Debug for InFrames<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InFrames(handle={})", self.frames.handle())
    }
}

/// Frames of a single-point input session.
///
/// The driver keeps only the latest value of each frame, so frame reads
/// return one frame per list entry. Reads never wait.
pub struct SinglePointInFrames<'d, D: ?Sized> {
    frames: Frames<'d, D>,
}

impl<'d, D: Driver + ?Sized> SinglePointInFrames<'d, D> {
    /// Create a view of the frames behind `handle`. No driver call is made.
    pub fn new(driver: &'d D, handle: Handle) -> Self {
        Self {
            frames: Frames::new(driver, handle),
        }
    }

    /// Read at most `max_bytes` of raw record bytes.
    pub fn read_bytes(&self, max_bytes: usize) -> Result<Vec<u8>> {
        read_bytes(self.driver(), self.handle(), max_bytes, Timeout::None)
    }

    /// Read one raw frame per list entry.
    pub fn read_raw(&self) -> Result<RawFrameIter<Vec<u8>>> {
        read_raw(self.driver(), self.handle(), self.len()?, Timeout::None)
    }

    /// Read one CAN frame per list entry.
    pub fn read_can(&self) -> Result<FrameIter<CanFrame, Vec<u8>>> {
        self.read_raw().map(FrameIter::new)
    }

    /// Read one frame of any supported type per list entry.
    pub fn read_frames(&self) -> Result<FrameIter<XnetFrame, Vec<u8>>> {
        self.read_raw().map(FrameIter::new)
    }
}

impl<'d, D: ?Sized> Deref for SinglePointInFrames<'d, D> {
    type Target = Frames<'d, D>;

    fn deref(&self) -> &Self::Target {
        &self.frames
    }
}

impl<D: ?Sized> fmt::Debug for SinglePointInFrames<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SinglePointInFrames(handle={})", self.frames.handle())
    }
}

// ============================================================================
// Output views
// ============================================================================

/// Frames of a queued output session.
///
/// Every write encodes the whole batch before handing it to the driver, so
/// an encoding error queues nothing. Pass [`Timeout::WRITE_DEFAULT`] for the
/// usual ten second wait.
pub struct OutFrames<'d, D: ?Sized> {
    frames: Frames<'d, D>,
}

impl<'d, D: Driver + ?Sized> OutFrames<'d, D> {
    /// Create a view of the frames behind `handle`. No driver call is made.
    pub fn new(driver: &'d D, handle: Handle) -> Self {
        Self {
            frames: Frames::new(driver, handle),
        }
    }

    /// Queue raw record bytes.
    pub fn write_bytes(&self, bytes: &[u8], timeout: Timeout) -> Result<()> {
        write_bytes(self.driver(), self.handle(), bytes, timeout)
    }

    /// Queue raw frames.
    pub fn write_raw<'a, I>(&self, frames: I, timeout: Timeout) -> Result<()>
    where
        I: IntoIterator<Item = &'a RawFrame>,
    {
        let bytes = raw::encode_all(frames)?;
        self.write_bytes(&bytes, timeout)
    }

    /// Queue CAN frames.
    pub fn write_can<'a, I>(&self, frames: I, timeout: Timeout) -> Result<()>
    where
        I: IntoIterator<Item = &'a CanFrame>,
    {
        self.write_frames(frames, timeout)
    }

    /// Queue frames of any supported type.
    pub fn write_frames<'a, F, I>(&self, frames: I, timeout: Timeout) -> Result<()>
    where
        F: Frame + 'a,
        I: IntoIterator<Item = &'a F>,
    {
        let bytes = crate::frame::encode_frames(frames)?;
        self.write_bytes(&bytes, timeout)
    }
}

impl<'d, D: ?Sized> Deref for OutFrames<'d, D> {
    type Target = Frames<'d, D>;

    fn deref(&self) -> &Self::Target {
        &self.frames
    }
}

impl<D: ?Sized> fmt::Debug for OutFrames<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutFrames(handle={})", self.frames.handle())
    }
}

/// Frames of a single-point output session. Writes replace the latest value
/// of each frame and never wait.
pub struct SinglePointOutFrames<'d, D: ?Sized> {
    frames: Frames<'d, D>,
}

impl<'d, D: Driver + ?Sized> SinglePointOutFrames<'d, D> {
    /// Create a view of the frames behind `handle`. No driver call is made.
    pub fn new(driver: &'d D, handle: Handle) -> Self {
        Self {
            frames: Frames::new(driver, handle),
        }
    }

    /// Write raw record bytes.
    pub fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        write_bytes(self.driver(), self.handle(), bytes, Timeout::None)
    }

    /// Write raw frames.
    pub fn write_raw<'a, I>(&self, frames: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a RawFrame>,
    {
        let bytes = raw::encode_all(frames)?;
        self.write_bytes(&bytes)
    }

    /// Write CAN frames.
    pub fn write_can<'a, I>(&self, frames: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a CanFrame>,
    {
        self.write_frames(frames)
    }

    /// Write frames of any supported type.
    pub fn write_frames<'a, F, I>(&self, frames: I) -> Result<()>
    where
        F: Frame + 'a,
        I: IntoIterator<Item = &'a F>,
    {
        let bytes = crate::frame::encode_frames(frames)?;
        self.write_bytes(&bytes)
    }
}

impl<'d, D: ?Sized> Deref for SinglePointOutFrames<'d, D> {
    type Target = Frames<'d, D>;

    fn deref(&self) -> &Self::Target {
        &self.frames
    }
}

impl<D: ?Sized> fmt::Debug for SinglePointOutFrames<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SinglePointOutFrames(handle={})", self.frames.handle())
    }
}
