//! Grow-only sample storage
//!
//! Sized off the audio thread; resizing to a smaller length only moves the
//! logical end, so later growth back up to the old size never reallocates.

/// Capacity-tracked sample buffer
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    data: Vec<f32>,
    len: usize,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zeroed buffer of `len` samples
    pub fn with_len(len: usize) -> Self {
        let mut buffer = Self::new();
        buffer.resize(len);
        buffer
    }

    /// Set the logical length, growing the storage if needed
    ///
    /// Newly exposed samples are zero.
    pub fn resize(&mut self, len: usize) {
        if self.data.len() < len {
            self.data.resize(len, 0.0);
        }
        if len > self.len {
            self.data[self.len..len].fill(0.0);
        }
        self.len = len;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated storage, never less than `len`
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data[..self.len]
    }

    pub fn clear(&mut self) {
        self.as_mut_slice().fill(0.0);
    }
}
