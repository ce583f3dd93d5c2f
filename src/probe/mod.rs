//! Container probing
//!
//! Classifies an input as WAV or AIFF and hands back a demuxer bound to the
//! detected format.
//!
//! # Usage
//!
//! ```rust,no_run
//! use pcmconv_lib::probe::MediaProbe;
//!
//! let probe = MediaProbe::new("take.wav")?;
//! let report = probe.analyze()?;
//!
//! // Print human-readable summary
//! println!("{}", report);
//!
//! // Or get JSON output
//! let json = report.to_json()?;
//! # Ok::<(), pcmconv_lib::error::Error>(())
//! ```

pub mod format_detector;
pub mod metadata;

use crate::codec::SampleBuffer;
use crate::error::Result;
use crate::format::aiff::AiffDemuxer;
use crate::format::wav::WavDemuxer;
use crate::format::{ContainerKind, Demuxer, StreamFormat};
use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::Path;

pub use format_detector::FormatDetector;
pub use metadata::ProbeReport;

/// Demuxer bound to whichever container the detector recognised
pub enum ProbedDemuxer<R> {
    Wav(WavDemuxer<R>),
    Aiff(AiffDemuxer<R>),
}

impl<R: Read + Seek> ProbedDemuxer<R> {
    fn inner(&self) -> &dyn Demuxer {
        match self {
            ProbedDemuxer::Wav(d) => d,
            ProbedDemuxer::Aiff(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Demuxer {
        match self {
            ProbedDemuxer::Wav(d) => d,
            ProbedDemuxer::Aiff(d) => d,
        }
    }

    /// Release the underlying reader
    pub fn into_inner(self) -> R {
        match self {
            ProbedDemuxer::Wav(d) => d.into_inner(),
            ProbedDemuxer::Aiff(d) => d.into_inner(),
        }
    }
}

impl<R: Read + Seek> Demuxer for ProbedDemuxer<R> {
    fn kind(&self) -> ContainerKind {
        self.inner().kind()
    }

    fn stream_format(&self) -> StreamFormat {
        self.inner().stream_format()
    }

    fn total_frames(&self) -> u64 {
        self.inner().total_frames()
    }

    fn frames_read(&self) -> u64 {
        self.inner().frames_read()
    }

    fn pcm_accessed(&self) -> bool {
        self.inner().pcm_accessed()
    }

    fn available_frames(&self) -> u64 {
        self.inner().available_frames()
    }

    fn seek_to_pcm(&mut self) -> Result<()> {
        self.inner_mut().seek_to_pcm()
    }

    fn read_samples(&mut self, buf: &mut SampleBuffer) -> Result<usize> {
        self.inner_mut().read_samples(buf)
    }
}

/// File-level probe used by `pcmconv-probe`
pub struct MediaProbe {
    /// Path to media file
    file_path: String,
    /// File size in bytes
    file_size: u64,
}

impl MediaProbe {
    /// Create new media probe for a file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_string_lossy().to_string();
        let file_size = fs::metadata(&path)?.len();

        Ok(Self {
            file_path,
            file_size,
        })
    }

    /// Detect the container and summarise its header
    pub fn analyze(&self) -> Result<ProbeReport> {
        let file = File::open(&self.file_path)?;
        let demuxer = FormatDetector::open(BufReader::new(file))?;

        let kind = demuxer.kind();
        let format = demuxer.stream_format();

        Ok(ProbeReport {
            file_path: self.file_path.clone(),
            file_size: self.file_size,
            container: kind,
            long_name: kind.long_name().to_string(),
            mime_type: kind.mime_type().to_string(),
            format,
            total_frames: demuxer.total_frames(),
            duration: demuxer.duration_seconds(),
            bitrate: format.byte_rate() * 8,
        })
    }
}
