//! Live monitor: capture device -> phaser -> playback device

use super::buffer::StereoRingBuffer;
use super::input::AudioInput;
use super::output::AudioOutput;
use crate::config::PhaserConfig;
use crate::error::PhaserError;
use crate::params::PhaserParams;
use crate::phaser::SpectralPhaser;
use std::sync::Arc;

/// Ring buffer size between capture and playback, in frames
const RING_FRAMES: usize = 16384;

pub struct LiveMonitor {
    input: AudioInput,
    output: AudioOutput,
    params: Arc<PhaserParams>,
}

impl LiveMonitor {
    /// Open the default devices and wire them through a new phaser
    pub fn open_default(config: PhaserConfig) -> Result<Self, PhaserError> {
        let (producer, consumer) = StereoRingBuffer::new(RING_FRAMES).split();

        let input = AudioInput::from_default_device(producer)?;
        let output_rate = AudioOutput::default_sample_rate()?;
        let input_rate = input.device_info().sample_rate;
        if input_rate != output_rate {
            return Err(PhaserError::SampleRateMismatch {
                input: input_rate,
                output: output_rate,
            });
        }

        let params = Arc::new(PhaserParams::new());
        let phaser = SpectralPhaser::with_params(config, output_rate as f32, Arc::clone(&params))?;
        let output = AudioOutput::from_default_device(consumer, phaser)?;

        tracing::info!(
            input = %input.device_info().name,
            output = %output.device_info().name,
            sample_rate = output_rate,
            "live monitor opened"
        );

        Ok(Self {
            input,
            output,
            params,
        })
    }

    pub fn start(&self) -> Result<(), PhaserError> {
        self.output.start()?;
        self.input.start()
    }

    pub fn pause(&self) -> Result<(), PhaserError> {
        self.input.pause()?;
        self.output.pause()
    }

    /// Parameter handle for the control thread
    pub fn params(&self) -> &Arc<PhaserParams> {
        &self.params
    }
}
