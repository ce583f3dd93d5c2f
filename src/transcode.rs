//! Chunked decode → encode loop
//!
//! Moves sample-frames from a [`Demuxer`] to a [`Muxer`] through one reused
//! buffer of bounded size, then finalizes the muxer. Whole-buffer transfer is
//! the same loop with the chunk size set to the declared frame count.

use crate::codec::SampleBuffer;
use crate::error::{Error, Result, Stage, StageExt};
use crate::format::{Demuxer, Muxer};
use tracing::debug;

/// Default number of sample-frames moved per iteration
pub const DEFAULT_CHUNK_FRAMES: usize = 4096;

/// Outcome of a completed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscodeReport {
    /// Sample-frames written to the muxer
    pub frames: u64,
    /// Non-empty chunks written
    pub chunks_written: u64,
    /// Read requests issued to the demuxer
    pub reads: u64,
}

/// Drives the chunked transfer between a demuxer and a muxer
#[derive(Debug, Clone, Copy)]
pub struct Transcoder {
    chunk_frames: usize,
}

impl Transcoder {
    /// Create a transcoder moving at most `chunk_frames` frames per read
    pub fn new(chunk_frames: usize) -> Result<Self> {
        if chunk_frames == 0 {
            return Err(Error::invalid_input("Chunk size must be at least one frame"));
        }
        Ok(Transcoder { chunk_frames })
    }

    /// Transcoder that moves the whole payload in one read.
    ///
    /// Positions `demuxer` at its PCM data so the chunk is sized from the
    /// frames actually present, never from the declared count alone.
    pub fn whole<D: Demuxer + ?Sized>(demuxer: &mut D) -> Result<Self> {
        if !demuxer.pcm_accessed() {
            demuxer.seek_to_pcm().stage(Stage::Decode)?;
        }
        let frames = usize::try_from(demuxer.available_frames())
            .map_err(|_| Error::invalid_input("Declared frame count does not fit in memory"))?;
        Transcoder::new(frames.max(1))
    }

    /// Configured chunk size in sample-frames
    pub fn chunk_frames(&self) -> usize {
        self.chunk_frames
    }

    /// Transfer every frame from `demuxer` to `muxer` and finalize.
    ///
    /// A chunk shorter than the chunk size ends the transfer after it is
    /// written; a full chunk always triggers another read. The muxer is not
    /// finalized if any read or write fails.
    pub fn run<D, M>(&self, demuxer: &mut D, muxer: &mut M) -> Result<TranscodeReport>
    where
        D: Demuxer + ?Sized,
        M: Muxer + ?Sized,
    {
        let format = demuxer.stream_format();
        if muxer.stream_format() != format {
            return Err(Error::invalid_input(format!(
                "Muxer format ({}) does not match source format ({})",
                muxer.stream_format(),
                format
            )));
        }

        if !demuxer.pcm_accessed() {
            demuxer.seek_to_pcm().stage(Stage::Decode)?;
        }

        let declared = demuxer.total_frames();
        let mut buf = SampleBuffer::with_frames(format, self.chunk_frames);
        let mut report = TranscodeReport::default();

        while report.frames <= declared {
            report.reads += 1;
            let frames = demuxer.read_samples(&mut buf).stage(Stage::Decode)?;
            if frames == 0 {
                break;
            }

            report.frames += frames as u64;

            let short = frames < self.chunk_frames;
            if short {
                buf.truncate_frames(frames);
            }

            muxer.write_samples(&buf).stage(Stage::Encode)?;
            report.chunks_written += 1;
            debug!(
                "Chunk {}: {} frames ({} of {})",
                report.chunks_written, frames, report.frames, declared
            );

            if short {
                break;
            }
        }

        muxer.finalize().stage(Stage::Finalize)?;
        Ok(report)
    }
}

impl Default for Transcoder {
    fn default() -> Self {
        Transcoder {
            chunk_frames: DEFAULT_CHUNK_FRAMES,
        }
    }
}
