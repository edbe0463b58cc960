//! Frequency warp and comb gain curve
//!
//! The comb places notches along a frequency axis that morphs between linear
//! bin spacing and ln(bin + 1) spacing. One period of the comb spans the bin
//! distance of the pitch parameter's fundamental.

use crate::params::ParamSnapshot;

/// Frequency of MIDI note 69
const A4_HZ: f32 = 440.0;
const A4_NOTE: f32 = 69.0;

/// Comb period limits for pitches far outside the keyboard, where exp2
/// under- or overflows and the warp cancels to zero
const MIN_BINS_PER_PERIOD: f32 = f32::EPSILON;
const MAX_BINS_PER_PERIOD: f32 = 1.0e6;

/// Blend a linear axis with a logarithmic one
///
/// `morph` = 0 returns `x`, `morph` = 1 returns ln(x + 1).
#[inline]
pub fn warp(x: f32, morph: f32) -> f32 {
    debug_assert!(x > -1.0, "warp argument must be above -1 (got {x})");
    x + (x.ln_1p() - x) * morph
}

/// Polynomial cosine over one period (Reaktor style, about -110 dB 3rd harmonic)
///
/// Input in [0, 1]; 0 maps to 1.0, 0.5 maps to -1.0.
#[inline]
pub fn sin_approx(x: f32) -> f32 {
    let x = 2.0 * (x - 0.5).abs() - 0.5;
    let x2 = x * x;
    let mut u = -0.540_347_43 * x2 + 2.535_656_2;
    u = u * x2 - 5.166_513;
    u = u * x2 + std::f32::consts::PI;
    u * x
}

/// MIDI pitch to an FFT bin distance
pub fn bins_per_period(pitch: f32, sample_rate: f32, fft_size: usize) -> f32 {
    let freq = A4_HZ * ((pitch - A4_NOTE) / 12.0).exp2();
    freq / sample_rate * fft_size as f32
}

/// Per-bin gain of the comb, fixed for one processing call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombCurve {
    /// Warped length of one comb period
    cycle: f32,
    phase: f32,
    morph: f32,
}

impl CombCurve {
    pub fn new(params: &ParamSnapshot, sample_rate: f32, fft_size: usize) -> Self {
        let bins = bins_per_period(params.pitch, sample_rate, fft_size)
            .clamp(MIN_BINS_PER_PERIOD, MAX_BINS_PER_PERIOD);
        let cycle = warp(bins, params.morph);
        debug_assert!(cycle > 0.0);

        Self {
            cycle,
            phase: params.phase,
            morph: params.morph,
        }
    }

    pub fn cycle(&self) -> f32 {
        self.cycle
    }

    /// Position of a bin within the comb period, in [0, 1)
    #[inline]
    pub fn position(&self, bin: usize) -> f32 {
        let p = warp(bin as f32, self.morph) / self.cycle + self.phase;
        p - p.floor()
    }

    /// Gain in [0, 1] for a bin
    #[inline]
    pub fn gain(&self, bin: usize) -> f32 {
        sin_approx(self.position(bin)) * 0.5 + 0.5
    }
}
