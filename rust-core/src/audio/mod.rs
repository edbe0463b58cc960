//! Live audio I/O: a stereo ring buffer plus cpal devices

pub mod buffer;
pub mod input;
pub mod monitor;
pub mod output;

pub use buffer::{StereoConsumer, StereoProducer, StereoRingBuffer};
pub use input::{AudioDeviceInfo, AudioInput};
pub use monitor::LiveMonitor;
pub use output::AudioOutput;
