//! Spectral Phaser - Streaming Short-Time Spectral Processing Core
//!
//! Overlap-add framing engine plus a frequency-domain comb ("phaser") effect
//! with warped notch spacing and an optional random-phase metallic texture.

#[cfg(feature = "live")]
pub mod audio;
pub mod config;
pub mod error;
pub mod params;
pub mod phaser;
pub mod spectrum;
pub mod stream;

pub use config::{PhaserConfig, StereoMode};
pub use error::PhaserError;
pub use params::{ParamSnapshot, PhaserParams};
pub use phaser::SpectralPhaser;
pub use spectrum::{SpectralFrame, WindowSymmetry, WindowType};
pub use stream::{BlockTransform, MonoFramer, StereoFramer, StreamingFramer};
