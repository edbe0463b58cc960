//! Windowed analysis/resynthesis of a single block
//!
//! window -> forward FFT -> caller modifies bins -> inverse FFT -> window
//!
//! The synthesis window carries the overlap-add compensation, so an untouched
//! spectrum streamed through an overlap-add framer comes back at unity gain.

use super::fft::FftEngine;
use super::window::{generate_window, overlap_add_gain, WindowSymmetry, WindowType};
use crate::error::PhaserError;
use num_complex::Complex;

/// Ripple above which a window/hop pair is reported as not overlap-add safe
const COLA_RIPPLE_TOLERANCE: f32 = 1e-3;

pub struct SpectralFrame {
    fft: FftEngine,
    analysis_window: Vec<f32>,
    synthesis_window: Vec<f32>,
}

impl SpectralFrame {
    /// Create a frame processor for blocks of `block_size` advanced by `hop`
    pub fn new(block_size: usize, hop: usize, window_type: WindowType) -> Result<Self, PhaserError> {
        if hop == 0 || hop > block_size {
            return Err(PhaserError::InvalidHop { hop, block_size });
        }
        let fft = FftEngine::new(block_size)?;

        let analysis_window = generate_window(window_type, block_size, WindowSymmetry::Periodic);
        let gain = overlap_add_gain(&analysis_window, hop);
        if gain.ripple > COLA_RIPPLE_TOLERANCE {
            tracing::warn!(
                ?window_type,
                block_size,
                hop,
                ripple = gain.ripple,
                "window/hop pair does not overlap-add to a constant; output will ripple"
            );
        }

        let compensation = if gain.mean > 0.0 { 1.0 / gain.mean } else { 0.0 };
        let synthesis_window = analysis_window.iter().map(|&w| w * compensation).collect();

        tracing::debug!(?window_type, block_size, hop, overlap_gain = gain.mean, "spectral frame ready");

        Ok(Self {
            fft,
            analysis_window,
            synthesis_window,
        })
    }

    /// Process one block
    ///
    /// `shape` receives the `block_size/2 + 1` bins and may modify them in place.
    /// `input` and `output` must both be `block_size` long.
    pub fn process<F>(&mut self, input: &[f32], output: &mut [f32], shape: F)
    where
        F: FnOnce(&mut [Complex<f32>]),
    {
        debug_assert_eq!(input.len(), self.analysis_window.len());
        debug_assert_eq!(output.len(), self.synthesis_window.len());

        for ((t, &x), &w) in self
            .fft
            .time_buffer_mut()
            .iter_mut()
            .zip(input)
            .zip(&self.analysis_window)
        {
            *t = x * w;
        }

        if let Err(err) = self.fft.forward() {
            debug_assert!(false, "forward FFT failed: {err}");
            output.fill(0.0);
            return;
        }

        shape(self.fft.spectrum_mut());

        if let Err(err) = self.fft.inverse(output) {
            debug_assert!(false, "inverse FFT failed: {err}");
            output.fill(0.0);
            return;
        }

        for (y, &w) in output.iter_mut().zip(&self.synthesis_window) {
            *y *= w;
        }
    }

    pub fn block_size(&self) -> usize {
        self.fft.fft_size()
    }

    pub fn num_bins(&self) -> usize {
        self.fft.num_bins()
    }

    pub fn analysis_window(&self) -> &[f32] {
        &self.analysis_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_untouched_block_is_windowed_twice() {
        let mut frame = SpectralFrame::new(64, 16, WindowType::Hann).unwrap();
        let input = vec![1.0f32; 64];
        let mut output = vec![0.0f32; 64];

        frame.process(&input, &mut output, |_| {});

        // Hann^2 scaled by 1/1.5
        let window = frame.analysis_window().to_vec();
        for (y, w) in output.iter().zip(window.iter()) {
            assert_abs_diff_eq!(*y, w * w / 1.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_zeroed_spectrum_gives_silence() {
        let mut frame = SpectralFrame::new(64, 16, WindowType::Hann).unwrap();
        let input: Vec<f32> = (0..64).map(|n| (n as f32 * 0.3).sin()).collect();
        let mut output = vec![1.0f32; 64];

        frame.process(&input, &mut output, |bins| bins.fill(Complex::new(0.0, 0.0)));

        assert!(output.iter().all(|&y| y.abs() < 1e-7));
    }

    #[test]
    fn test_invalid_hop() {
        assert!(matches!(
            SpectralFrame::new(64, 0, WindowType::Hann),
            Err(PhaserError::InvalidHop { hop: 0, block_size: 64 })
        ));
        assert!(SpectralFrame::new(64, 65, WindowType::Hann).is_err());
        assert!(SpectralFrame::new(100, 25, WindowType::Hann).is_err());
    }
}
