//! Interleaved integer sample buffers

use crate::format::StreamFormat;

/// An ordered run of interleaved samples, grouped into sample-frames
///
/// The buffer's length is the request size when handed to a decoder: the
/// decoder fills a prefix and reports how many frames it wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    format: StreamFormat,
    data: Vec<i32>,
}

impl SampleBuffer {
    /// Create a zero-filled buffer holding `frames` sample-frames
    pub fn with_frames(format: StreamFormat, frames: usize) -> Self {
        SampleBuffer {
            format,
            data: vec![0; frames * format.channels as usize],
        }
    }

    /// Wrap existing interleaved samples
    pub fn from_samples(format: StreamFormat, data: Vec<i32>) -> Self {
        SampleBuffer { format, data }
    }

    /// Stream format the samples belong to
    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Number of channels per frame
    pub fn channels(&self) -> usize {
        self.format.channels as usize
    }

    /// Number of whole sample-frames
    pub fn num_frames(&self) -> usize {
        match self.channels() {
            0 => 0,
            ch => self.data.len() / ch,
        }
    }

    /// Total number of samples across all channels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True if the sample count divides evenly into frames
    pub fn is_whole_frames(&self) -> bool {
        self.channels() != 0 && self.data.len() % self.channels() == 0
    }

    /// Shorten the buffer to `frames` sample-frames
    pub fn truncate_frames(&mut self, frames: usize) {
        self.data.truncate(frames * self.channels());
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[i32] {
        &self.data
    }

    /// Mutable interleaved samples
    pub fn samples_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }

    /// Samples of a single frame
    pub fn frame(&self, index: usize) -> Option<&[i32]> {
        let ch = self.channels();
        self.data.get(index * ch..(index + 1) * ch)
    }

    /// Consume the buffer, returning the interleaved samples
    pub fn into_samples(self) -> Vec<i32> {
        self.data
    }
}
