//! Probe report structures
//!
//! Serialized by the `pcmconv-probe` binary as text or JSON.

use crate::error::Result;
use crate::format::{ContainerKind, StreamFormat};
use serde::Serialize;
use std::fmt;

/// Summary of a probed PCM container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    /// File path
    pub file_path: String,
    /// File size in bytes
    pub file_size: u64,
    /// Detected container
    pub container: ContainerKind,
    /// Long container name
    pub long_name: String,
    /// Container MIME type
    pub mime_type: String,
    /// Stream parameters from the header
    pub format: StreamFormat,
    /// Declared sample-frames
    pub total_frames: u64,
    /// Duration in seconds
    pub duration: f64,
    /// Nominal bitrate in bits/second
    pub bitrate: u64,
}

impl ProbeReport {
    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert to compact JSON string
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input #0, {} from '{}':", self.container, self.file_path)?;
        writeln!(
            f,
            "  File Size: {} bytes ({:.2} MB)",
            self.file_size,
            self.file_size as f64 / 1_048_576.0
        )?;
        writeln!(f, "  MIME Type: {}", self.mime_type)?;

        let hours = (self.duration / 3600.0) as u32;
        let minutes = ((self.duration % 3600.0) / 60.0) as u32;
        let seconds = self.duration % 60.0;
        writeln!(f, "  Duration: {:02}:{:02}:{:05.2}", hours, minutes, seconds)?;
        writeln!(f, "  Bitrate: {:.2} kbps", self.bitrate as f64 / 1000.0)?;
        writeln!(f, "  Stream #0: Audio: pcm ({}), {}", self.long_name, self.format)?;
        write!(f, "  Frames: {}", self.total_frames)
    }
}
