//! In-memory driver.

use core::cell::{Cell, RefCell};

use alloc::string::String;
use alloc::vec::Vec;

use crate::driver::{Driver, Handle, PropertyId, PropertyValue, Timeout};
use crate::raw::{self, RawFrame};
use crate::types::FRAME_FLAGS_TRANSMIT_ECHO;
use crate::{Error, Result};

/// A property write recorded by [`LoopbackDriver`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyWrite {
    pub handle: Handle,
    pub index: usize,
    pub property: PropertyId,
    pub value: PropertyValue,
}

/// A [`Driver`] that keeps everything in memory.
///
/// Written records are queued and handed back by reads, so an output and an
/// input view on the same driver form a loopback. Records can also be
/// injected to simulate received traffic. All handles share one queue and
/// one item list.
///
/// Reads never wait. With [`Timeout::None`] they return whatever whole
/// records fit the byte budget; with any other timeout they fail with
/// [`Error::Timeout`] unless the full budget is already queued, and consume
/// nothing in that case.
///
/// ```
/// use nixnet_rs::session::{InFrames, LoopbackDriver, OutFrames};
/// use nixnet_rs::{CanFrame, CanIdentifier, Handle, Timeout};
///
/// let driver = LoopbackDriver::with_items(["Tx"]).with_echo(true);
/// let output = OutFrames::new(&driver, Handle(1));
/// let input = InFrames::new(&driver, Handle(2));
///
/// output.write_can(&[CanFrame::data(CanIdentifier::standard(0x10), &[1, 2])], Timeout::None)?;
/// let frames = input.read_can(1, Timeout::None)?.collect::<nixnet_rs::Result<Vec<_>>>()?;
/// assert!(frames[0].echo);
/// # Ok::<(), nixnet_rs::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct LoopbackDriver {
    names: Vec<String>,
    reported_count: Cell<Option<usize>>,
    name_queries: Cell<usize>,
    queue: RefCell<Vec<u8>>,
    write_capacity: Option<usize>,
    echo: bool,
    properties: RefCell<Vec<PropertyWrite>>,
}

impl LoopbackDriver {
    /// Create a driver with an empty item list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver whose sessions list the given item names.
    pub fn with_items<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Mark written records as transmit echoes when they are read back.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Limit the queue to `bytes`. Writes that would overflow it time out.
    pub fn with_write_capacity(mut self, bytes: usize) -> Self {
        self.write_capacity = Some(bytes);
        self
    }

    /// Override the item count reported by [`Driver::item_count`], to mimic
    /// a driver whose list changed after a collection cached its names.
    pub fn set_reported_count(&self, count: Option<usize>) {
        self.reported_count.set(count);
    }

    /// Number of times the item names were requested.
    pub fn name_queries(&self) -> usize {
        self.name_queries.get()
    }

    /// Queue frames as if they had been received from the bus.
    pub fn inject<'a, I>(&self, frames: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a RawFrame>,
    {
        let bytes = raw::encode_all(frames)?;
        self.queue.borrow_mut().extend_from_slice(&bytes);
        Ok(())
    }

    /// Number of queued bytes.
    pub fn queued_bytes(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Property writes seen so far, oldest first.
    pub fn properties(&self) -> Vec<PropertyWrite> {
        self.properties.borrow().clone()
    }

    /// Length of the longest run of whole records at the start of `queue`
    /// that fits in `max_bytes`.
    fn whole_records(queue: &[u8], max_bytes: usize) -> Result<usize> {
        let mut end = 0;
        while end < queue.len() {
            let (_, consumed) = raw::decode_one(queue, end)?;
            if end + consumed > max_bytes {
                break;
            }
            end += consumed;
        }
        Ok(end)
    }
}

impl Driver for LoopbackDriver {
    fn read_frame(&self, _handle: Handle, max_bytes: usize, timeout: Timeout) -> Result<Vec<u8>> {
        let mut queue = self.queue.borrow_mut();
        if timeout != Timeout::None && queue.len() < max_bytes {
            return Err(Error::Timeout);
        }
        let end = Self::whole_records(&queue, max_bytes)?;
        Ok(queue.drain(..end).collect())
    }

    fn write_frame(&self, _handle: Handle, bytes: &[u8], _timeout: Timeout) -> Result<()> {
        // Writes must supply whole records, padding included, or nothing is queued.
        let mut records = Vec::with_capacity(bytes.len());
        let mut offset = 0;
        while offset < bytes.len() {
            let (mut frame, consumed) = raw::decode_one(bytes, offset)?;
            let needed = raw::record_size(frame.payload.len());
            if consumed < needed {
                return Err(Error::TruncatedRecord {
                    offset,
                    needed,
                    available: consumed,
                });
            }
            if self.echo {
                frame.flags |= FRAME_FLAGS_TRANSMIT_ECHO;
            }
            raw::encode_into(&frame, &mut records)?;
            offset += consumed;
        }

        let mut queue = self.queue.borrow_mut();
        if let Some(capacity) = self.write_capacity {
            if queue.len() + records.len() > capacity {
                return Err(Error::Timeout);
            }
        }
        queue.extend_from_slice(&records);
        Ok(())
    }

    fn item_count(&self, _handle: Handle) -> Result<usize> {
        Ok(self.reported_count.get().unwrap_or(self.names.len()))
    }

    fn item_names(&self, _handle: Handle) -> Result<Vec<String>> {
        self.name_queries.set(self.name_queries.get() + 1);
        Ok(self.names.clone())
    }

    fn set_property(
        &self,
        handle: Handle,
        index: usize,
        property: PropertyId,
        value: PropertyValue,
    ) -> Result<()> {
        self.properties.borrow_mut().push(PropertyWrite {
            handle,
            index,
            property,
            value,
        });
        Ok(())
    }
}
