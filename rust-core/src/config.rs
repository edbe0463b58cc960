//! Phaser configuration
//!
//! Fixed at construction time. Changing any of these values means building
//! a new [`SpectralPhaser`](crate::SpectralPhaser) off the audio thread.

use crate::error::PhaserError;
use crate::spectrum::WindowType;

/// How the right channel is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StereoMode {
    /// Process the left channel and copy the result to the right channel
    #[default]
    DuplicateLeft,

    /// Process both channels through the same comb
    Independent,
}

/// Spectral phaser configuration
#[derive(Debug, Clone)]
pub struct PhaserConfig {
    /// FFT block size (power of 2)
    pub block_size: usize,

    /// Samples between consecutive blocks
    pub hop_size: usize,

    /// Analysis/synthesis window
    pub window_type: WindowType,

    /// Seed for the metallic phase table (`None` draws from the OS)
    pub seed: Option<u64>,

    pub stereo_mode: StereoMode,
}

impl Default for PhaserConfig {
    fn default() -> Self {
        Self {
            block_size: 1024,
            hop_size: 256,
            window_type: WindowType::Hann,
            seed: None,
            stereo_mode: StereoMode::DuplicateLeft,
        }
    }
}

impl PhaserConfig {
    /// Check sizes before any buffer is allocated
    pub fn validate(&self) -> Result<(), PhaserError> {
        if self.block_size < 2 || !self.block_size.is_power_of_two() {
            return Err(PhaserError::UnsupportedBlockSize(self.block_size));
        }
        if self.hop_size == 0 || self.hop_size > self.block_size {
            return Err(PhaserError::InvalidHop {
                hop: self.hop_size,
                block_size: self.block_size,
            });
        }
        Ok(())
    }

    /// Number of spectral bins per block
    pub fn num_bins(&self) -> usize {
        self.block_size / 2 + 1
    }
}
