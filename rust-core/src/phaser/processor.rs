//! Spectral phaser - streaming comb effect
//!
//! Framing, spectral shaping and parameter handling in one stereo processor.
//! Everything is allocated in [`SpectralPhaser::new`]; `process` and `reset`
//! never allocate.

use super::comb::CombShaper;
use super::warp::CombCurve;
use crate::config::{PhaserConfig, StereoMode};
use crate::error::PhaserError;
use crate::params::PhaserParams;
use crate::spectrum::SpectralFrame;
use crate::stream::StereoFramer;
use std::sync::Arc;

pub struct SpectralPhaser {
    config: PhaserConfig,
    sample_rate: f32,
    params: Arc<PhaserParams>,
    framer: StereoFramer,
    frame: SpectralFrame,
    comb: CombShaper,
}

fn check_sample_rate(sample_rate: f32) -> Result<(), PhaserError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(PhaserError::InvalidSampleRate(sample_rate))
    }
}

impl SpectralPhaser {
    /// Create a phaser with default parameters
    pub fn new(config: PhaserConfig, sample_rate: f32) -> Result<Self, PhaserError> {
        Self::with_params(config, sample_rate, Arc::new(PhaserParams::new()))
    }

    /// Create a phaser driven by an existing parameter set
    pub fn with_params(
        config: PhaserConfig,
        sample_rate: f32,
        params: Arc<PhaserParams>,
    ) -> Result<Self, PhaserError> {
        config.validate()?;
        check_sample_rate(sample_rate)?;

        let framer = StereoFramer::new(config.block_size, config.hop_size)?;
        let frame = SpectralFrame::new(config.block_size, config.hop_size, config.window_type)?;
        let comb = CombShaper::new(config.num_bins(), config.seed);

        tracing::debug!(
            block_size = config.block_size,
            hop = config.hop_size,
            sample_rate,
            stereo_mode = ?config.stereo_mode,
            seeded = config.seed.is_some(),
            "spectral phaser initialised"
        );

        Ok(Self {
            config,
            sample_rate,
            params,
            framer,
            frame,
            comb,
        })
    }

    /// Switch sample rate and clear the stream
    pub fn init(&mut self, sample_rate: f32) -> Result<(), PhaserError> {
        check_sample_rate(sample_rate)?;
        self.sample_rate = sample_rate;
        self.reset();
        Ok(())
    }

    /// Process a stereo chunk in place
    ///
    /// Parameters are read once at the start of the call. In
    /// [`StereoMode::DuplicateLeft`] the right input is ignored and replaced by
    /// the processed left channel.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len(), "channel lengths differ");
        let len = left.len().min(right.len());
        let (left, right) = (&mut left[..len], &mut right[..len]);

        let snapshot = self.params.snapshot();
        let curve = CombCurve::new(&snapshot, self.sample_rate, self.config.block_size);
        let metallic = snapshot.metallic;

        let frame = &mut self.frame;
        let comb = &self.comb;

        match self.config.stereo_mode {
            StereoMode::DuplicateLeft => {
                let mut transform = |input: [&[f32]; 2], output: [&mut [f32]; 2]| {
                    let [out_left, out_right] = output;
                    frame.process(input[0], out_left, |bins| comb.apply(bins, &curve, metallic));
                    out_right.copy_from_slice(out_left);
                };
                self.framer.process([left, right], &mut transform);
            }
            StereoMode::Independent => {
                let mut transform = |input: [&[f32]; 2], output: [&mut [f32]; 2]| {
                    for (block_in, block_out) in input.into_iter().zip(output) {
                        frame.process(block_in, block_out, |bins| {
                            comb.apply(bins, &curve, metallic)
                        });
                    }
                };
                self.framer.process([left, right], &mut transform);
            }
        }
    }

    /// Clear all buffered audio; parameters are untouched
    pub fn reset(&mut self) {
        self.framer.reset();
    }

    pub fn params(&self) -> &Arc<PhaserParams> {
        &self.params
    }

    pub fn config(&self) -> &PhaserConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Added latency in samples for hop-aligned host buffers
    pub fn latency(&self) -> usize {
        self.framer.latency()
    }

    /// Comb curve for the current parameter values
    pub fn comb_curve(&self) -> CombCurve {
        CombCurve::new(&self.params.snapshot(), self.sample_rate, self.config.block_size)
    }

    /// Rotation table used in metallic mode
    pub fn phase_table(&self) -> &[num_complex::Complex<f32>] {
        self.comb.phase_table()
    }
}
