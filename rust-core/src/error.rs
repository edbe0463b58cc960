//! Configuration errors
//!
//! Everything here is reported while building or resizing a processor.
//! The audio path itself never returns an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhaserError {
    #[error("Block size {0} is not a supported transform size (power of two, at least 2)")]
    UnsupportedBlockSize(usize),

    #[error("Hop size {hop} is invalid for block size {block_size} (need 0 < hop <= block size)")]
    InvalidHop { hop: usize, block_size: usize },

    #[error("Sample rate must be positive and finite (found: {0} Hz)")]
    InvalidSampleRate(f32),

    #[error("FFT failed: {0}")]
    Fft(#[from] realfft::FftError),

    #[cfg(feature = "live")]
    #[error("No audio {0} device found")]
    NoDevice(&'static str),

    #[cfg(feature = "live")]
    #[error("Failed to get device name: {0}")]
    DeviceName(String),

    #[cfg(feature = "live")]
    #[error("Failed to get default config: {0}")]
    DefaultConfig(String),

    #[cfg(feature = "live")]
    #[error("Failed to build stream: {0}")]
    BuildStream(String),

    #[cfg(feature = "live")]
    #[error("Failed to play stream: {0}")]
    PlayStream(String),

    #[cfg(feature = "live")]
    #[error("Input runs at {input} Hz but output runs at {output} Hz")]
    SampleRateMismatch { input: u32, output: u32 },
}
