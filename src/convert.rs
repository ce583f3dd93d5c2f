//! File-to-file conversion entry point

use crate::error::{Error, Result, Stage, StageExt};
use crate::format::{create_muxer, ContainerKind, Demuxer};
use crate::probe::FormatDetector;
use crate::transcode::{TranscodeReport, Transcoder, DEFAULT_CHUNK_FRAMES};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tracing::info;

/// Default output file stem
pub const DEFAULT_OUTPUT_STEM: &str = "out";

/// Everything one conversion run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Source container path
    pub input_path: PathBuf,
    /// Container to write
    pub target_format: ContainerKind,
    /// Output path without extension
    pub output_stem: String,
    /// Sample-frames moved per iteration
    pub chunk_frames: usize,
}

impl ConvertConfig {
    /// Create a configuration with the default stem and chunk size
    pub fn new<P: Into<PathBuf>>(input_path: P, target_format: ContainerKind) -> Self {
        ConvertConfig {
            input_path: input_path.into(),
            target_format,
            output_stem: DEFAULT_OUTPUT_STEM.to_string(),
            chunk_frames: DEFAULT_CHUNK_FRAMES,
        }
    }

    /// Set the output stem
    pub fn with_output_stem<S: Into<String>>(mut self, stem: S) -> Self {
        self.output_stem = stem.into();
        self
    }

    /// Set the chunk size
    pub fn with_chunk_frames(mut self, chunk_frames: usize) -> Self {
        self.chunk_frames = chunk_frames;
        self
    }

    /// Output file name: the stem with the target extension appended
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}.{}",
            self.output_stem,
            self.target_format.extension()
        ))
    }
}

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertReport {
    /// Detected source container
    pub source_format: ContainerKind,
    /// File that was written
    pub output_path: PathBuf,
    /// Loop statistics
    pub transcode: TranscodeReport,
}

/// Convert `config.input_path` into `config.target_format`.
///
/// Errors carry the stage they came from. On failure the output file may
/// exist with unpatched header sizes.
pub fn convert(config: ConvertConfig) -> Result<ConvertReport> {
    let transcoder = Transcoder::new(config.chunk_frames)?;

    let input = File::open(&config.input_path)
        .map_err(Error::from)
        .stage(Stage::Open)?;
    let mut demuxer = FormatDetector::open(BufReader::new(input)).stage(Stage::Sniff)?;
    let source_format = demuxer.kind();
    let format = demuxer.stream_format();
    info!(
        "Input {}: {} ({}), {} frames",
        config.input_path.display(),
        source_format,
        format,
        demuxer.total_frames()
    );

    demuxer.seek_to_pcm().stage(Stage::Decode)?;

    let output_path = config.output_path();
    let output = File::create(&output_path)
        .map_err(Error::from)
        .stage(Stage::Create)?;
    let mut muxer =
        create_muxer(config.target_format, BufWriter::new(output), format).stage(Stage::Encode)?;

    let transcode = transcoder.run(&mut demuxer, &mut *muxer)?;
    info!(
        "Wrote {} frames in {} chunks to {}",
        transcode.frames,
        transcode.chunks_written,
        output_path.display()
    );

    Ok(ConvertReport {
        source_format,
        output_path,
        transcode,
    })
}
