//! PCM (Pulse Code Modulation) codec
//!
//! PCM is uncompressed audio, the simplest and most straightforward codec.
//! This module converts between the raw bytes of a container's data region
//! and interleaved integer samples.

pub mod decoder;
pub mod encoder;

pub use decoder::PcmDecoder;
pub use encoder::PcmEncoder;

use crate::error::Result;
use crate::format::StreamFormat;
use crate::util::{Endianness, SampleFormat};

/// PCM codec configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmConfig {
    /// Sample width
    pub sample_format: SampleFormat,
    /// Number of channels
    pub channels: u16,
    /// Byte order of multi-byte samples
    pub endianness: Endianness,
    /// 8-bit samples are stored unsigned with a 128 offset (RIFF convention)
    pub unsigned_8bit: bool,
}

impl PcmConfig {
    /// Create a new PCM configuration
    pub fn new(sample_format: SampleFormat, channels: u16, endianness: Endianness) -> Self {
        PcmConfig {
            sample_format,
            channels,
            endianness,
            unsigned_8bit: false,
        }
    }

    /// Layout used by RIFF/WAVE data chunks
    pub fn wav(format: &StreamFormat) -> Result<Self> {
        Ok(PcmConfig {
            unsigned_8bit: true,
            ..PcmConfig::new(format.sample_format()?, format.channels, Endianness::Little)
        })
    }

    /// Layout used by AIFF sound data chunks
    pub fn aiff(format: &StreamFormat, endianness: Endianness) -> Result<Self> {
        Ok(PcmConfig::new(
            format.sample_format()?,
            format.channels,
            endianness,
        ))
    }

    /// Get bytes per sample for a single channel
    pub fn bytes_per_sample(&self) -> usize {
        self.sample_format.sample_size()
    }

    /// Get bytes per frame (all channels)
    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_sample() * self.channels as usize
    }

    /// Calculate number of whole frames from byte count
    pub fn frames_from_bytes(&self, bytes: usize) -> usize {
        match self.bytes_per_frame() {
            0 => 0,
            n => bytes / n,
        }
    }
}
