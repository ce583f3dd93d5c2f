//! Common utilities and data structures

pub mod samplefmt;

pub use samplefmt::SampleFormat;

use std::fmt;

/// Byte order of multi-byte samples and header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Least significant byte first (RIFF, AIFC `sowt`)
    Little,
    /// Most significant byte first (AIFF)
    Big,
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => write!(f, "little-endian"),
            Endianness::Big => write!(f, "big-endian"),
        }
    }
}
