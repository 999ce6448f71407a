//! Session-facing frame views.
//!
//! This is the only layer that calls into a [`Driver`](crate::Driver). Each
//! view wraps the frame list of one session handle and adds the read or write
//! operations that session mode allows:
//!
//! | View | Reads/Writes | Timeout |
//! |------|--------------|---------|
//! | [`InFrames`] | `read_bytes`, `read_raw`, `read_can`, `read_frames` | caller |
//! | [`SinglePointInFrames`] | same, one frame per list entry | none |
//! | [`OutFrames`] | `write_bytes`, `write_raw`, `write_can`, `write_frames` | caller |
//! | [`SinglePointOutFrames`] | same | none |
//!
//! All views dereference to [`Frames`], the list of [`SessionFrame`] items,
//! so lookups by position or name work on them directly.
//!
//! With the `tracing` feature enabled, driver calls are reported as
//! `debug`/`trace` events.

mod frames;
mod loopback;

pub use frames::{
    Frames, InFrames, OutFrames, SessionFrame, SinglePointInFrames, SinglePointOutFrames,
};
pub use loopback::{LoopbackDriver, PropertyWrite};
