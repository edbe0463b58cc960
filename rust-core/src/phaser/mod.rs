//! Spectral comb ("phaser") effect

pub mod comb;
pub mod processor;
pub mod warp;

pub use comb::CombShaper;
pub use processor::SpectralPhaser;
pub use warp::{bins_per_period, sin_approx, warp, CombCurve};
