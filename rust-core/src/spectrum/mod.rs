//! Windowed FFT building blocks

pub mod fft;
pub mod frame;
pub mod window;

pub use fft::FftEngine;
pub use frame::SpectralFrame;
pub use window::{apply_window_inplace, generate_window, WindowSymmetry, WindowType};
