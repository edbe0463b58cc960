//! Streaming overlap-add framing

pub mod buffer;
pub mod framer;

pub use buffer::SampleBuffer;
pub use framer::{BlockTransform, MonoFramer, StereoFramer, StreamingFramer};
