//! FFT engine using realfft for real-valued blocks
//!
//! Forward and inverse transforms share one set of pre-allocated buffers so
//! that a block can be analysed, modified and resynthesised without touching
//! the allocator.

use crate::error::PhaserError;
use num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Real FFT engine of a fixed power-of-two size
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real-to-complex processor
    r2c: Arc<dyn RealToComplex<f32>>,

    /// Complex-to-real processor
    c2r: Arc<dyn ComplexToReal<f32>>,

    /// Time-domain input for the forward transform
    time_buffer: Vec<f32>,

    /// Spectrum (fft_size/2 + 1 bins)
    spectrum: Vec<Complex<f32>>,

    forward_scratch: Vec<Complex<f32>>,
    inverse_scratch: Vec<Complex<f32>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size, must be a power of two
    pub fn new(fft_size: usize) -> Result<Self, PhaserError> {
        if fft_size < 2 || !fft_size.is_power_of_two() {
            return Err(PhaserError::UnsupportedBlockSize(fft_size));
        }

        let mut planner = RealFftPlanner::<f32>::new();
        let r2c = planner.plan_fft_forward(fft_size);
        let c2r = planner.plan_fft_inverse(fft_size);

        let time_buffer = r2c.make_input_vec();
        let spectrum = r2c.make_output_vec();
        let forward_scratch = r2c.make_scratch_vec();
        let inverse_scratch = c2r.make_scratch_vec();

        Ok(Self {
            fft_size,
            r2c,
            c2r,
            time_buffer,
            spectrum,
            forward_scratch,
            inverse_scratch,
        })
    }

    /// Time-domain buffer read by `forward`
    pub fn time_buffer_mut(&mut self) -> &mut [f32] {
        &mut self.time_buffer
    }

    /// Transform the time buffer into the spectrum
    ///
    /// The time buffer is used as scratch and holds garbage afterwards.
    pub fn forward(&mut self) -> Result<(), PhaserError> {
        self.r2c.process_with_scratch(
            &mut self.time_buffer,
            &mut self.spectrum,
            &mut self.forward_scratch,
        )?;
        Ok(())
    }

    /// Transform the spectrum back into `output`, normalised by 1/N
    ///
    /// The imaginary parts of the DC and Nyquist bins cannot be represented by
    /// a real signal and are discarded. The spectrum is consumed as scratch.
    pub fn inverse(&mut self, output: &mut [f32]) -> Result<(), PhaserError> {
        if let Some(dc) = self.spectrum.first_mut() {
            dc.im = 0.0;
        }
        if let Some(nyquist) = self.spectrum.last_mut() {
            nyquist.im = 0.0;
        }

        self.c2r
            .process_with_scratch(&mut self.spectrum, output, &mut self.inverse_scratch)?;

        let scale = 1.0 / self.fft_size as f32;
        for sample in output.iter_mut() {
            *sample *= scale;
        }
        Ok(())
    }

    pub fn spectrum(&self) -> &[Complex<f32>] {
        &self.spectrum
    }

    pub fn spectrum_mut(&mut self) -> &mut [Complex<f32>] {
        &mut self.spectrum
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(matches!(
            FftEngine::new(1000),
            Err(PhaserError::UnsupportedBlockSize(1000))
        ));
        assert!(FftEngine::new(0).is_err());
        assert!(FftEngine::new(1024).is_ok());
    }

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(1024).unwrap();
        fft.time_buffer_mut().fill(1.0);
        fft.forward().unwrap();

        let spectrum = fft.spectrum();
        assert_eq!(spectrum.len(), 513);
        assert_abs_diff_eq!(spectrum[0].re, 1024.0, epsilon = 1e-2);
        assert!(spectrum[10].norm() < 1e-2);
    }

    #[test]
    fn test_fft_sine_peak() {
        let mut fft = FftEngine::new(1024).unwrap();
        for (n, x) in fft.time_buffer_mut().iter_mut().enumerate() {
            *x = (2.0 * PI * 32.0 * n as f32 / 1024.0).sin();
        }
        fft.forward().unwrap();

        let (peak_bin, _) = fft
            .spectrum()
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().partial_cmp(&b.norm()).unwrap())
            .unwrap();
        assert_eq!(peak_bin, 32);
        assert_abs_diff_eq!(fft.spectrum()[32].norm(), 512.0, epsilon = 1e-1);
    }

    #[test]
    fn test_inverse_restores_block() {
        let mut fft = FftEngine::new(256).unwrap();
        let input: Vec<f32> = (0..256).map(|n| ((n * 37) % 11) as f32 - 5.0).collect();
        fft.time_buffer_mut().copy_from_slice(&input);
        fft.forward().unwrap();

        let mut output = vec![0.0; 256];
        fft.inverse(&mut output).unwrap();

        for (a, b) in input.iter().zip(output.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_sizes() {
        let fft = FftEngine::new(1024).unwrap();
        assert_eq!(fft.fft_size(), 1024);
        assert_eq!(fft.num_bins(), 513);
    }
}
