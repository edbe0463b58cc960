//! Lock-free stereo ring buffer
//!
//! Carries interleaved left/right frames from the capture callback to the
//! playback callback. Frames are always pushed and popped as whole pairs.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// Stereo frame ring buffer
pub struct StereoRingBuffer {
    producer: HeapProducer<f32>,
    consumer: HeapConsumer<f32>,
}

impl StereoRingBuffer {
    /// Create new ring buffer holding up to `capacity_frames` stereo frames
    pub fn new(capacity_frames: usize) -> Self {
        let rb = HeapRb::<f32>::new(2 * capacity_frames);
        let (producer, consumer) = rb.split();

        Self { producer, consumer }
    }

    /// Split into producer and consumer ends
    pub fn split(self) -> (StereoProducer, StereoConsumer) {
        (
            StereoProducer {
                producer: self.producer,
            },
            StereoConsumer {
                consumer: self.consumer,
            },
        )
    }
}

/// Producer end (capture side)
pub struct StereoProducer {
    producer: HeapProducer<f32>,
}

impl StereoProducer {
    /// Write interleaved device samples with `channels` channels
    ///
    /// Mono input is duplicated to both sides; channels beyond the second are
    /// dropped. Returns the number of frames written (fewer if the buffer is
    /// full).
    pub fn write_interleaved(&mut self, data: &[f32], channels: usize) -> usize {
        if channels == 0 {
            return 0;
        }

        let mut written = 0;
        for frame in data.chunks_exact(channels) {
            if self.producer.free_len() < 2 {
                break;
            }
            let left = frame[0];
            let right = if channels > 1 { frame[1] } else { left };
            // Space was checked above, so neither push can fail
            let _ = self.producer.push(left);
            let _ = self.producer.push(right);
            written += 1;
        }
        written
    }

    /// Number of frames that can still be written
    pub fn free_frames(&self) -> usize {
        self.producer.free_len() / 2
    }
}

/// Consumer end (playback side)
pub struct StereoConsumer {
    consumer: HeapConsumer<f32>,
}

impl StereoConsumer {
    /// Read up to `left.len()` frames into separate channel buffers
    ///
    /// Returns the number of frames read; the rest of both buffers is zeroed.
    pub fn read_frames(&mut self, left: &mut [f32], right: &mut [f32]) -> usize {
        let wanted = left.len().min(right.len()).min(self.available_frames());

        for (l, r) in left.iter_mut().zip(right.iter_mut()).take(wanted) {
            *l = self.consumer.pop().unwrap_or(0.0);
            *r = self.consumer.pop().unwrap_or(0.0);
        }
        left[wanted..].fill(0.0);
        right[wanted..].fill(0.0);

        wanted
    }

    /// Number of complete frames available
    pub fn available_frames(&self) -> usize {
        self.consumer.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }
}
