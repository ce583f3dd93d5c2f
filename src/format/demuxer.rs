//! Demuxer for reading PCM containers

use super::wav::DataRegion;
use super::{ContainerKind, StreamFormat};
use crate::codec::{PcmConfig, PcmDecoder, SampleBuffer};
use crate::error::{Error, Result};
use std::io::{Read, Seek, SeekFrom};
use tracing::{debug, warn};

/// Sequential PCM access to a decoded container
///
/// Implemented once per container format. Callers depend on this trait
/// only; the concrete format is chosen once by the format detector.
pub trait Demuxer {
    /// Container format this demuxer reads
    fn kind(&self) -> ContainerKind;

    /// Stream parameters declared by the container header
    fn stream_format(&self) -> StreamFormat;

    /// Total sample-frames declared by the container header
    fn total_frames(&self) -> u64;

    /// Sample-frames handed out so far
    fn frames_read(&self) -> u64;

    /// Whether the read position has been moved to the PCM data region
    fn pcm_accessed(&self) -> bool;

    /// Sample-frames the source can actually supply.
    ///
    /// Never exceeds `total_frames()`. Bounded by the data region size from
    /// the header, and by the stream length once `seek_to_pcm` has run.
    fn available_frames(&self) -> u64;

    /// Position the reader at the first byte of PCM data.
    ///
    /// Fails with `MalformedContainer` if the container has no PCM data
    /// region.
    fn seek_to_pcm(&mut self) -> Result<()>;

    /// Fill a prefix of `buf` with the next sample-frames.
    ///
    /// Requests `buf.num_frames()` frames and returns how many were written;
    /// zero means the stream is exhausted. Seeks to the PCM data first if
    /// that has not happened yet.
    fn read_samples(&mut self, buf: &mut SampleBuffer) -> Result<usize>;

    /// Decode the entire PCM payload in one call.
    ///
    /// The result holds exactly `total_frames()` frames. Fails with
    /// `TruncatedContainer` if the body holds fewer frames than declared,
    /// before any buffer is sized from the header.
    fn read_all(&mut self) -> Result<SampleBuffer> {
        if self.frames_read() != 0 {
            return Err(Error::invalid_state(
                "Whole-buffer decode requested after chunked reads",
            ));
        }
        if !self.pcm_accessed() {
            self.seek_to_pcm()?;
        }

        let declared = self.total_frames();
        let available = self.available_frames();
        if available < declared {
            return Err(Error::TruncatedContainer {
                declared,
                available,
            });
        }

        let frames = usize::try_from(declared).map_err(|_| {
            Error::invalid_input(format!("{} frames do not fit in memory", declared))
        })?;

        let mut buf = SampleBuffer::with_frames(self.stream_format(), frames);
        let available = self.read_samples(&mut buf)? as u64;
        if available < declared {
            return Err(Error::TruncatedContainer {
                declared,
                available,
            });
        }

        Ok(buf)
    }

    /// Get duration in seconds
    fn duration_seconds(&self) -> f64 {
        self.stream_format().duration_seconds(self.total_frames())
    }
}

/// Decode cursor shared by the container demuxers
///
/// Tracks frames handed out against frames declared and owns the PCM
/// decoder for the data region. Reads never run past the data region or
/// the end of the stream.
pub struct DemuxerContext {
    kind: ContainerKind,
    format: StreamFormat,
    decoder: PcmDecoder,
    region: Option<DataRegion>,
    total_frames: u64,
    available_frames: u64,
    frames_read: u64,
    pcm_accessed: bool,
    exhausted: bool,
}

impl DemuxerContext {
    /// Create a new demuxer context
    pub fn new(
        kind: ContainerKind,
        format: StreamFormat,
        config: PcmConfig,
        region: Option<DataRegion>,
        total_frames: u64,
    ) -> Self {
        let available_frames = region.map_or(0, |r| {
            total_frames.min(r.size / format.block_align().max(1) as u64)
        });

        DemuxerContext {
            kind,
            format,
            decoder: PcmDecoder::new(config),
            region,
            total_frames,
            available_frames,
            frames_read: 0,
            pcm_accessed: false,
            exhausted: false,
        }
    }

    /// Get the container kind
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Get the stream format
    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Get the declared frame count
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frames handed out so far
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Whether the reader sits in the data region
    pub fn pcm_accessed(&self) -> bool {
        self.pcm_accessed
    }

    /// Frames the data region and stream can supply
    pub fn available_frames(&self) -> u64 {
        self.available_frames
    }

    /// Move the reader to the start of the data region and reset the cursor
    pub fn seek_to_pcm<R: Seek>(&mut self, reader: &mut R) -> Result<()> {
        let region = self.region.ok_or_else(|| {
            Error::malformed(format!("{} container has no PCM data region", self.kind))
        })?;

        let stream_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(region.start))?;

        let readable = stream_len.saturating_sub(region.start).min(region.size);
        let block_align = self.format.block_align().max(1) as u64;
        self.available_frames = self.total_frames.min(readable / block_align);
        debug!(
            "Positioned {} reader at PCM data offset {} ({} of {} frames present)",
            self.kind, region.start, self.available_frames, self.total_frames
        );

        self.pcm_accessed = true;
        self.frames_read = 0;
        self.exhausted = false;
        Ok(())
    }

    /// Read the next frames into the front of `buf`
    pub fn read_samples<R: Read + Seek>(
        &mut self,
        reader: &mut R,
        buf: &mut SampleBuffer,
    ) -> Result<usize> {
        if buf.format() != self.format {
            return Err(Error::invalid_input(format!(
                "Buffer format ({}) does not match stream format ({})",
                buf.format(),
                self.format
            )));
        }

        if !self.pcm_accessed {
            self.seek_to_pcm(reader)?;
        }

        if self.exhausted {
            return Ok(0);
        }

        let remaining = self.available_frames - self.frames_read;
        let want = (buf.num_frames() as u64).min(remaining) as usize;
        if want == 0 {
            return Ok(0);
        }

        let channels = self.format.channels as usize;
        let frames = self
            .decoder
            .read_frames(reader, &mut buf.samples_mut()[..want * channels])?;
        self.frames_read += frames as u64;

        if frames < want
            || (self.frames_read == self.available_frames
                && self.available_frames < self.total_frames)
        {
            warn!(
                "{} data region ended after {} of {} declared frames",
                self.kind, self.frames_read, self.total_frames
            );
            self.exhausted = true;
        }

        Ok(frames)
    }
}
