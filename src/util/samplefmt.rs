//! Integer PCM sample format definitions

use crate::error::{Error, Result};
use std::fmt;

/// Integer PCM sample width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// Signed 8-bit
    S8,
    /// Signed 16-bit
    S16,
    /// Signed 24-bit, packed in 3 bytes
    S24,
    /// Signed 32-bit
    S32,
}

impl SampleFormat {
    /// Map a container's bit depth to a sample format
    pub fn from_bit_depth(bit_depth: u16) -> Result<Self> {
        match bit_depth {
            8 => Ok(SampleFormat::S8),
            16 => Ok(SampleFormat::S16),
            24 => Ok(SampleFormat::S24),
            32 => Ok(SampleFormat::S32),
            other => Err(Error::UnsupportedBitDepth(other)),
        }
    }

    /// Bits per sample
    pub fn bit_depth(&self) -> u16 {
        match self {
            SampleFormat::S8 => 8,
            SampleFormat::S16 => 16,
            SampleFormat::S24 => 24,
            SampleFormat::S32 => 32,
        }
    }

    /// Get the size in bytes of one sample
    pub fn sample_size(&self) -> usize {
        self.bit_depth() as usize / 8
    }

    /// Smallest representable sample value
    pub fn min_value(&self) -> i32 {
        match self {
            SampleFormat::S32 => i32::MIN,
            _ => -(1 << (self.bit_depth() - 1)),
        }
    }

    /// Largest representable sample value
    pub fn max_value(&self) -> i32 {
        match self {
            SampleFormat::S32 => i32::MAX,
            _ => (1 << (self.bit_depth() - 1)) - 1,
        }
    }

    /// Check whether `sample` fits in this width
    pub fn contains(&self, sample: i32) -> bool {
        (self.min_value()..=self.max_value()).contains(&sample)
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleFormat::S8 => "s8",
            SampleFormat::S16 => "s16",
            SampleFormat::S24 => "s24",
            SampleFormat::S32 => "s32",
        };
        write!(f, "{}", name)
    }
}
