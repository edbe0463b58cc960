//! Overlap-add streaming framer
//!
//! Turns arbitrarily sized chunks into blocks of `block_size` samples spaced
//! `hop` apart, hands each block to a transform, and sums the transformed
//! blocks back into a continuous stream of the same length as the input.
//!
//! Buffers per channel:
//! - input: the not-yet-retired tail of the stream (`block_size`)
//! - process: transform output for the current block (`block_size`)
//! - output: overlap-add accumulator (`2 * (block_size + hop)`)
//!
//! Accumulator samples below `ready` are final, the rest are partial sums.
//! Everything at or beyond `buffered` is zero.

use super::buffer::SampleBuffer;
use crate::error::PhaserError;

/// Per-block callback used by [`StreamingFramer::process`]
///
/// Receives `block_size` input samples per channel and must fill the
/// `block_size` output samples per channel.
pub trait BlockTransform<const C: usize> {
    fn process_block(&mut self, input: [&[f32]; C], output: [&mut [f32]; C]);
}

impl<const C: usize, F> BlockTransform<C> for F
where
    F: FnMut([&[f32]; C], [&mut [f32]; C]),
{
    #[inline]
    fn process_block(&mut self, input: [&[f32]; C], output: [&mut [f32]; C]) {
        self(input, output)
    }
}

/// Overlap-add framer for `C` channels
#[derive(Debug, Clone)]
pub struct StreamingFramer<const C: usize> {
    block_size: usize,
    hop: usize,

    input: [SampleBuffer; C],
    process: [SampleBuffer; C],
    output: [SampleBuffer; C],

    /// Write cursor into the input buffers
    input_pos: usize,

    /// Number of final samples at the front of the accumulator
    ready: usize,

    /// End of the non-zero region of the accumulator
    buffered: usize,
}

pub type MonoFramer = StreamingFramer<1>;
pub type StereoFramer = StreamingFramer<2>;

fn validate(block_size: usize, hop: usize) -> Result<(), PhaserError> {
    if block_size == 0 {
        return Err(PhaserError::UnsupportedBlockSize(block_size));
    }
    if hop == 0 || hop > block_size {
        return Err(PhaserError::InvalidHop { hop, block_size });
    }
    Ok(())
}

impl<const C: usize> StreamingFramer<C> {
    /// Create a framer with all buffers sized for `block_size` and `hop`
    pub fn new(block_size: usize, hop: usize) -> Result<Self, PhaserError> {
        validate(block_size, hop)?;

        let mut framer = Self {
            block_size,
            hop,
            input: std::array::from_fn(|_| SampleBuffer::new()),
            process: std::array::from_fn(|_| SampleBuffer::new()),
            output: std::array::from_fn(|_| SampleBuffer::new()),
            input_pos: 0,
            ready: 0,
            buffered: 0,
        };
        framer.allocate();
        Ok(framer)
    }

    /// Change the block size; resets the stream
    pub fn set_size(&mut self, block_size: usize) -> Result<(), PhaserError> {
        validate(block_size, self.hop)?;
        self.reset();
        self.block_size = block_size;
        self.allocate();
        Ok(())
    }

    /// Change the hop; resets the stream
    pub fn set_hop(&mut self, hop: usize) -> Result<(), PhaserError> {
        validate(self.block_size, hop)?;
        self.reset();
        self.hop = hop;
        self.allocate();
        Ok(())
    }

    fn allocate(&mut self) {
        let accumulator = 2 * (self.block_size + self.hop);
        for buffer in self.input.iter_mut().chain(self.process.iter_mut()) {
            buffer.resize(self.block_size);
        }
        for buffer in self.output.iter_mut() {
            buffer.resize(accumulator);
        }
        tracing::debug!(
            channels = C,
            block_size = self.block_size,
            hop = self.hop,
            accumulator,
            "framer buffers sized"
        );
    }

    /// Drop all buffered audio; keeps the allocation
    pub fn reset(&mut self) {
        for buffer in self
            .input
            .iter_mut()
            .chain(self.process.iter_mut())
            .chain(self.output.iter_mut())
        {
            buffer.clear();
        }
        self.input_pos = 0;
        self.ready = 0;
        self.buffered = 0;
    }

    /// Stream one chunk through the transform, in place
    ///
    /// All channels must have the same length. The transform runs once per
    /// completed block. Output is silent until enough blocks have been summed.
    pub fn process<T>(&mut self, mut channels: [&mut [f32]; C], transform: &mut T)
    where
        T: BlockTransform<C> + ?Sized,
    {
        let len = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        debug_assert!(
            channels.iter().all(|c| c.len() == len),
            "channel lengths differ"
        );

        let mut pos = 0;
        while pos < len {
            // Never straddle a hop boundary, so one long call behaves like
            // a run of hop-sized calls
            let take = (self.block_size - self.input_pos)
                .min(len - pos)
                .min(self.hop);

            for (buffer, channel) in self.input.iter_mut().zip(channels.iter()) {
                buffer.as_mut_slice()[self.input_pos..self.input_pos + take]
                    .copy_from_slice(&channel[pos..pos + take]);
            }
            self.input_pos += take;

            if self.input_pos == self.block_size {
                self.emit_block(transform);
            }

            if self.ready >= take {
                self.extract(&mut channels, pos, take);
            } else {
                for channel in channels.iter_mut() {
                    channel[pos..pos + take].fill(0.0);
                }
            }

            pos += take;
        }
    }

    fn emit_block<T>(&mut self, transform: &mut T)
    where
        T: BlockTransform<C> + ?Sized,
    {
        let n = self.block_size;
        let hop = self.hop;

        {
            let input = self.input.each_ref().map(|b| b.as_slice());
            let output = self.process.each_mut().map(|b| b.as_mut_slice());
            transform.process_block(input, output);
        }

        // Keep the overlap for the next block
        for buffer in self.input.iter_mut() {
            buffer.as_mut_slice().copy_within(hop..n, 0);
        }
        self.input_pos -= hop;

        let offset = self.ready;
        for (acc, block) in self.output.iter_mut().zip(self.process.iter()) {
            for (a, &b) in acc.as_mut_slice()[offset..offset + n]
                .iter_mut()
                .zip(block.as_slice())
            {
                *a += b;
            }
        }
        self.buffered = offset + n;
        self.ready += hop;

        debug_assert!(self.output.iter().all(|acc| self.buffered <= acc.len()));
    }

    fn extract(&mut self, channels: &mut [&mut [f32]; C], pos: usize, take: usize) {
        let buffered = self.buffered;
        for (acc, channel) in self.output.iter_mut().zip(channels.iter_mut()) {
            let acc = acc.as_mut_slice();
            channel[pos..pos + take].copy_from_slice(&acc[..take]);
            acc.copy_within(take..buffered, 0);
            acc[buffered - take..buffered].fill(0.0);
        }
        self.ready -= take;
        self.buffered -= take;
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Added latency in samples when chunks arrive on hop boundaries
    pub fn latency(&self) -> usize {
        self.block_size - self.hop
    }

    /// Samples currently staged for the next block
    pub fn input_position(&self) -> usize {
        self.input_pos
    }

    /// Final samples waiting to be read out
    pub fn ready_len(&self) -> usize {
        self.ready
    }

    /// Extent of the non-zero accumulator region
    pub fn buffered_len(&self) -> usize {
        self.buffered
    }

    /// Overlap-add accumulator of one channel
    pub fn accumulator(&self, channel: usize) -> &[f32] {
        self.output[channel].as_slice()
    }
}
