//! Audio playback using cpal
//!
//! Pulls captured frames from the ring buffer, runs them through the phaser
//! inside the playback callback and writes the result to the device.

use super::buffer::StereoConsumer;
use super::input::AudioDeviceInfo;
use crate::error::PhaserError;
use crate::phaser::SpectralPhaser;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};

/// Frames processed per pass inside the playback callback
const SCRATCH_FRAMES: usize = 4096;

/// Audio output stream
pub struct AudioOutput {
    stream: Stream,
    device_info: AudioDeviceInfo,
}

/// Callback state owned by the playback thread
struct PlaybackState {
    consumer: StereoConsumer,
    phaser: SpectralPhaser,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl PlaybackState {
    fn render(&mut self, data: &mut [f32], channels: usize) {
        for block in data.chunks_mut(SCRATCH_FRAMES * channels) {
            let frames = block.len() / channels;
            let left = &mut self.left[..frames];
            let right = &mut self.right[..frames];

            self.consumer.read_frames(left, right);
            self.phaser.process(left, right);

            for (i, frame) in block.chunks_exact_mut(channels).enumerate() {
                for (ch, sample) in frame.iter_mut().enumerate() {
                    *sample = match ch {
                        0 => left[i],
                        1 => right[i],
                        _ => 0.0,
                    };
                }
            }
        }
    }
}

impl AudioOutput {
    /// Query the default output device's sample rate
    pub fn default_sample_rate() -> Result<u32, PhaserError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PhaserError::NoDevice("output"))?;
        let config = device
            .default_output_config()
            .map_err(|e| PhaserError::DefaultConfig(e.to_string()))?;
        Ok(config.sample_rate().0)
    }

    /// Create audio output on the default device
    pub fn from_default_device(
        consumer: StereoConsumer,
        phaser: SpectralPhaser,
    ) -> Result<Self, PhaserError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PhaserError::NoDevice("output"))?;

        Self::from_device(device, consumer, phaser)
    }

    /// Create audio output on a specific device
    pub fn from_device(
        device: Device,
        consumer: StereoConsumer,
        phaser: SpectralPhaser,
    ) -> Result<Self, PhaserError> {
        let name = device
            .name()
            .map_err(|e| PhaserError::DeviceName(e.to_string()))?;

        let config = device
            .default_output_config()
            .map_err(|e| PhaserError::DefaultConfig(e.to_string()))?;

        let device_info = AudioDeviceInfo {
            name,
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
        };

        let stream_config: StreamConfig = config.into();
        let channels = (stream_config.channels as usize).max(1);

        let mut state = PlaybackState {
            consumer,
            phaser,
            left: vec![0.0; SCRATCH_FRAMES],
            right: vec![0.0; SCRATCH_FRAMES],
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    state.render(data, channels);
                },
                move |err| {
                    tracing::warn!(%err, "audio output error");
                },
                None,
            )
            .map_err(|e| PhaserError::BuildStream(e.to_string()))?;

        tracing::debug!(?device_info, "audio output ready");

        Ok(Self {
            stream,
            device_info,
        })
    }

    /// Start playing audio
    pub fn start(&self) -> Result<(), PhaserError> {
        self.stream
            .play()
            .map_err(|e| PhaserError::PlayStream(e.to_string()))
    }

    /// Pause audio playback
    pub fn pause(&self) -> Result<(), PhaserError> {
        self.stream
            .pause()
            .map_err(|e| PhaserError::PlayStream(e.to_string()))
    }

    /// Get device information
    pub fn device_info(&self) -> &AudioDeviceInfo {
        &self.device_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::buffer::StereoRingBuffer;
    use crate::config::PhaserConfig;

    #[test]
    fn test_render_interleaves_processed_frames() {
        let (mut producer, consumer) = StereoRingBuffer::new(8192).split();
        let input: Vec<f32> = (0..4096)
            .flat_map(|n| {
                let x = (n as f32 * 0.05).sin();
                [x, x]
            })
            .collect();
        producer.write_interleaved(&input, 2);

        let phaser = SpectralPhaser::new(PhaserConfig::default(), 48000.0).unwrap();
        let mut state = PlaybackState {
            consumer,
            phaser,
            left: vec![0.0; SCRATCH_FRAMES],
            right: vec![0.0; SCRATCH_FRAMES],
        };

        // Three device channels: the third stays silent
        let mut data = vec![1.0f32; 3 * 4096];
        state.render(&mut data, 3);

        assert!(data.chunks_exact(3).all(|f| f[2] == 0.0 && f[0] == f[1]));
        assert!(data.chunks_exact(3).any(|f| f[0].abs() > 0.01));
    }
}
