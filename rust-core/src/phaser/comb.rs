//! Comb shaping of a block's spectrum
//!
//! Scales every bin by the comb curve and, in metallic mode, rotates it by a
//! fixed random phase. The rotation table is drawn once per shaper so the
//! texture is stable over time but decorrelated across frequency.

use super::warp::CombCurve;
use num_complex::Complex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

pub struct CombShaper {
    /// Unit rotation per bin, phase uniform in [0, π)
    phase_table: Vec<Complex<f32>>,
}

impl CombShaper {
    /// Build the rotation table for `num_bins` bins
    ///
    /// With a seed the table is reproducible; without one it is drawn from OS
    /// entropy.
    pub fn new(num_bins: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let phase_table = (0..num_bins)
            .map(|_| Complex::from_polar(1.0, rng.gen_range(0.0..PI)))
            .collect();

        Self { phase_table }
    }

    pub fn phase_table(&self) -> &[Complex<f32>] {
        &self.phase_table
    }

    /// Apply the comb (and the metallic rotation if enabled) in place
    pub fn apply(&self, bins: &mut [Complex<f32>], curve: &CombCurve, metallic: bool) {
        debug_assert_eq!(bins.len(), self.phase_table.len());

        for (i, bin) in bins.iter_mut().enumerate() {
            *bin *= curve.gain(i);
        }

        if metallic {
            for (bin, rotation) in bins.iter_mut().zip(&self.phase_table) {
                *bin *= *rotation;
            }
        }
    }
}
