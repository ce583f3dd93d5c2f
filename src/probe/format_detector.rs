//! Container Format Detection
//!
//! This module detects container formats by examining file headers and magic numbers.

use super::ProbedDemuxer;
use crate::error::{Error, Result};
use crate::format::aiff::{AiffDemuxer, AIFC_TYPE, AIFF_TYPE, FORM_MAGIC};
use crate::format::wav::{WavDemuxer, RIFF_MAGIC, WAVE_MAGIC};
use crate::format::ContainerKind;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use tracing::debug;

/// Format detector for PCM containers
pub struct FormatDetector;

impl FormatDetector {
    /// Classify the container held by `reader`.
    ///
    /// The WAV signature is tried first; the AIFF signature is tried from a
    /// fresh start of the source. The read position is left at the start.
    pub fn detect<R: Read + Seek>(reader: &mut R) -> Result<ContainerKind> {
        if Self::probe_signature(reader, Self::is_wav)? {
            return Ok(ContainerKind::Wav);
        }
        if Self::probe_signature(reader, Self::is_aiff)? {
            return Ok(ContainerKind::Aiff);
        }
        Err(Error::UnrecognizedContainer)
    }

    /// Detect the container and bind a demuxer to it
    pub fn open<R: Read + Seek>(mut reader: R) -> Result<ProbedDemuxer<R>> {
        let kind = Self::detect(&mut reader)?;
        debug!("Detected {} container", kind);

        match kind {
            ContainerKind::Wav => Ok(ProbedDemuxer::Wav(WavDemuxer::new(reader)?)),
            ContainerKind::Aiff => Ok(ProbedDemuxer::Aiff(AiffDemuxer::new(reader)?)),
        }
    }

    fn probe_signature<R: Read + Seek>(reader: &mut R, matches: fn(&[u8]) -> bool) -> Result<bool> {
        let mut header = [0u8; 12];
        reader.seek(SeekFrom::Start(0))?;
        let found = match reader.read_exact(&mut header) {
            Ok(()) => matches(&header),
            // Too short to carry either signature
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => false,
            Err(e) => return Err(Error::Io(e)),
        };
        reader.seek(SeekFrom::Start(0))?;
        Ok(found)
    }

    /// Check if file is WAV
    fn is_wav(header: &[u8]) -> bool {
        if header.len() < 12 {
            return false;
        }
        // WAV: RIFF....WAVE
        &header[0..4] == RIFF_MAGIC && &header[8..12] == WAVE_MAGIC
    }

    /// Check if file is AIFF or AIFF-C
    fn is_aiff(header: &[u8]) -> bool {
        if header.len() < 12 {
            return false;
        }
        // AIFF: FORM....AIFF or FORM....AIFC
        &header[0..4] == FORM_MAGIC && (&header[8..12] == AIFF_TYPE || &header[8..12] == AIFC_TYPE)
    }
}
