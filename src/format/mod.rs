//! Container format handling (demuxing and muxing)
//!
//! This module provides the WAV and AIFF readers and writers and the traits
//! the transcode loop drives them through.

pub mod aiff;
pub mod chunk;
pub mod demuxer;
pub mod muxer;
pub mod stream;
pub mod wav;

pub use chunk::ChunkHeader;
pub use demuxer::{Demuxer, DemuxerContext};
pub use muxer::{create_muxer, Muxer, MuxerContext, MuxerState};
pub use stream::StreamFormat;

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Supported PCM container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// RIFF/WAVE
    Wav,
    /// Audio Interchange File Format
    Aiff,
}

impl ContainerKind {
    /// Short format name
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::Wav => "wav",
            ContainerKind::Aiff => "aiff",
        }
    }

    /// Long/descriptive name
    pub fn long_name(&self) -> &'static str {
        match self {
            ContainerKind::Wav => "WAV / WAVE (Waveform Audio)",
            ContainerKind::Aiff => "AIFF (Audio Interchange File Format)",
        }
    }

    /// File extension appended to output stems
    pub fn extension(&self) -> &'static str {
        self.name()
    }

    /// MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            ContainerKind::Wav => "audio/wav",
            ContainerKind::Aiff => "audio/aiff",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContainerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "wav" | "wave" => Ok(ContainerKind::Wav),
            "aiff" | "aif" => Ok(ContainerKind::Aiff),
            other => Err(Error::invalid_input(format!(
                "Unknown target format '{}' (expected wav, wave, aiff or aif)",
                other
            ))),
        }
    }
}

/// Detect format from file extension
pub fn detect_format_from_extension(path: &str) -> Option<ContainerKind> {
    let (_, ext) = path.rsplit_once('.')?;
    match ext.to_lowercase().as_str() {
        "wav" | "wave" => Some(ContainerKind::Wav),
        "aiff" | "aif" | "aifc" => Some(ContainerKind::Aiff),
        _ => None,
    }
}
