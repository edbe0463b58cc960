//! Audio capture using cpal
//!
//! Feeds the capture device into a stereo ring buffer.

use super::buffer::StereoProducer;
use crate::error::PhaserError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};

/// Audio device information
#[derive(Debug, Clone)]
pub struct AudioDeviceInfo {
    pub name: String,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Audio input stream
pub struct AudioInput {
    stream: Stream,
    device_info: AudioDeviceInfo,
}

impl AudioInput {
    /// Create audio input from default device
    pub fn from_default_device(producer: StereoProducer) -> Result<Self, PhaserError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(PhaserError::NoDevice("input"))?;

        Self::from_device(device, producer)
    }

    /// Create audio input from specific device
    pub fn from_device(device: Device, mut producer: StereoProducer) -> Result<Self, PhaserError> {
        let name = device
            .name()
            .map_err(|e| PhaserError::DeviceName(e.to_string()))?;

        let config = device
            .default_input_config()
            .map_err(|e| PhaserError::DefaultConfig(e.to_string()))?;

        let device_info = AudioDeviceInfo {
            name,
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
        };

        let stream_config: StreamConfig = config.into();
        let channels = stream_config.channels as usize;

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Frames that do not fit are dropped; the playback side
                    // fills the gap with silence
                    producer.write_interleaved(data, channels);
                },
                move |err| {
                    tracing::warn!(%err, "audio input error");
                },
                None,
            )
            .map_err(|e| PhaserError::BuildStream(e.to_string()))?;

        tracing::debug!(?device_info, "audio input ready");

        Ok(Self {
            stream,
            device_info,
        })
    }

    /// Start capturing audio
    pub fn start(&self) -> Result<(), PhaserError> {
        self.stream
            .play()
            .map_err(|e| PhaserError::PlayStream(e.to_string()))
    }

    /// Pause audio capture
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
