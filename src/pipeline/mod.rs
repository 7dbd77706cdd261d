//! Mount Pipeline
//!
//! Executes components against a [`Document`](crate::dom::Document).
//!
//! ```text
//! Component ─► merge config ─► create node ─► id / classes / style / attrs / props
//!           ─► children ─► append to parent ─► event listeners ─► named outputs
//! ```
//!
//! - **bridge** - one DOM listener forwarding into one output stream
//! - **mount** - the per-element execution steps and the [`MountHandle`]

pub mod bridge;
pub mod mount;

pub use bridge::event_stream;
pub use mount::{MountHandle, mount, run_component};
