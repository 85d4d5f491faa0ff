//! Read-only frame extraction for renderers.

mod frame;

pub use frame::FrameBuffers;
