//! CAN frame types.
//!
//! This module provides the typed CAN records of the Raw Frame Format:
//! - [`CanIdentifier`]: arbitration identifier with the driver's extended-bit encoding
//! - [`CanFrame`]: data, remote and CAN FD frames
//! - [`CanBusErrorFrame`]: bus error reports
//!
//! With the `can` feature, identifiers and frames interoperate with
//! [`embedded-can`](https://crates.io/crates/embedded-can).
//!
//! # Example
//!
//! ```
//! use nixnet_rs::can::{CanFrame, CanIdentifier};
//! use nixnet_rs::Frame;
//!
//! let frame = CanFrame::data(CanIdentifier::standard(0x100), &[1, 2, 3, 4]);
//! let raw = frame.to_raw()?;
//! assert_eq!(raw.identifier, 0x100);
//! # Ok::<(), nixnet_rs::Error>(())
//! ```

mod bus_error;
mod frame;
mod identifier;

pub use bus_error::CanBusErrorFrame;
pub use frame::CanFrame;
pub use identifier::{CanIdentifier, EXTENDED_FRAME_ID_MASK, FRAME_ID_MASK};
