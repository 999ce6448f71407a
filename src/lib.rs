#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

//! # nixnet-rs
//!
//! A Rust library for the NI-XNET Raw Frame Format and the item lists of
//! NI-XNET sessions.
//!
//! The Raw Frame Format is the byte stream an NI-XNET interface hands out on
//! reads and accepts on writes: a sequence of fixed-header records, each
//! padded to a multiple of 8 payload bytes. This crate converts that stream
//! to and from typed frames, and exposes the frames and signals of a session
//! as collections addressable by position or name.
//!
//! ## Features
//!
//! - **Codec**: Decode and encode raw records with exact padding rules
//! - **Typed frames**: CAN data/remote/FD frames, CAN bus errors, and the
//!   delay, log trigger and start trigger pseudo-frames
//! - **Collections**: Lazily cached, dual-indexed item lists
//! - **Sessions**: Input and output frame views over a pluggable [`Driver`]
//!
//! ## Quick Start
//!
//! ### Decoding a buffer
//!
//! ```
//! use nixnet_rs::{decode_frames, encode_frames, CanFrame, CanIdentifier, XnetFrame, Result};
//!
//! fn main() -> Result<()> {
//!     let frames = vec![
//!         XnetFrame::from(CanFrame::data(CanIdentifier::standard(0x100), &[1, 2, 3])),
//!         XnetFrame::from(CanFrame::data(CanIdentifier::extended(0x1ABCDE), &[0; 8])),
//!     ];
//!     let bytes = encode_frames(&frames)?;
//!     assert_eq!(bytes.len(), 48);
//!
//!     for frame in decode_frames::<XnetFrame>(&bytes) {
//!         println!("{:?}", frame?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Reading through a session
//!
//! ```
//! use nixnet_rs::session::{InFrames, LoopbackDriver};
//! use nixnet_rs::{FrameType, Handle, RawFrame, Timeout, XnetFrame, Result};
//!
//! fn main() -> Result<()> {
//!     let driver = LoopbackDriver::with_items(["EngineData"]);
//!     driver.inject(&[RawFrame::new(10, 0x100, FrameType::CanData, vec![0x42])])?;
//!
//!     let input = InFrames::new(&driver, Handle(1));
//!     assert_eq!(input.get("EngineData")?.item().index(), 0);
//!
//!     let frames = input.read_frames(8, Timeout::None)?.collect::<Result<Vec<_>>>()?;
//!     assert!(matches!(frames[0], XnetFrame::Can(_)));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`raw`] | Raw Frame Format records and the byte codec |
//! | [`can`] | CAN identifiers, frames and bus error frames |
//! | [`special`] | Delay and trigger pseudo-frames |
//! | [`collection`] | Name and position indexed item lists |
//! | [`session`] | Session frame views and the in-memory [`session::LoopbackDriver`] |
//! | [`driver`] | The [`Driver`] boundary |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], which is an alias for
//! `core::result::Result<T, Error>`. Codec functions never log; failures are
//! reported only through the returned [`Error`].

extern crate alloc;

pub mod can;
pub mod collection;
pub mod driver;
pub mod error;
pub mod raw;
pub mod session;
pub mod special;

mod frame;
mod types;

// Re-export commonly used types at the crate root
pub use can::{CanBusErrorFrame, CanFrame, CanIdentifier};
pub use collection::{Collection, CollectionItem, Item, ItemKey};
pub use driver::{Driver, Handle, PropertyId, PropertyValue, Timeout};
pub use error::{Error, Result};
pub use frame::{Frame, FrameIter, XnetFrame, decode_frames, encode_frames};
pub use raw::RawFrame;
pub use special::{DelayFrame, LogTriggerFrame, StartTriggerFrame};
pub use types::{
    CanCommState, CanLastErr, FRAME_FLAGS_TRANSMIT_ECHO, FRAME_ID_CAN_IS_EXTENDED, FrameType,
};
