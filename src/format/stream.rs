//! Stream format parameters shared by decoders and encoders

use crate::error::{Error, Result};
use crate::util::SampleFormat;
use serde::Serialize;
use std::fmt;

/// Parameters carried unchanged from the source container to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StreamFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample (8, 16, 24 or 32)
    pub bit_depth: u16,
    /// Number of interleaved channels
    pub channels: u16,
}

impl StreamFormat {
    /// Create a new stream format
    pub fn new(sample_rate: u32, bit_depth: u16, channels: u16) -> Self {
        StreamFormat {
            sample_rate,
            bit_depth,
            channels,
        }
    }

    /// Validate format parameters
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::malformed("Invalid channel count: 0"));
        }

        if self.sample_rate == 0 {
            return Err(Error::malformed("Invalid sample rate: 0"));
        }

        SampleFormat::from_bit_depth(self.bit_depth)?;
        Ok(())
    }

    /// Sample width for this stream's bit depth
    pub fn sample_format(&self) -> Result<SampleFormat> {
        SampleFormat::from_bit_depth(self.bit_depth)
    }

    /// Bytes per sample-frame (all channels); zero for unsupported depths
    pub fn block_align(&self) -> usize {
        self.channels as usize * (self.bit_depth as usize / 8)
    }

    /// Bytes per second of audio
    pub fn byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.block_align() as u64
    }

    /// Length in seconds of `frames` sample-frames
    pub fn duration_seconds(&self, frames: u64) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        frames as f64 / self.sample_rate as f64
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {}-bit, {} channel{}",
            self.sample_rate,
            self.bit_depth,
            self.channels,
            if self.channels == 1 { "" } else { "s" }
        )
    }
}
