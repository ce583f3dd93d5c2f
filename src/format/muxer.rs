//! Muxer for writing PCM containers

use super::aiff::AiffMuxer;
use super::wav::WavMuxer;
use super::{ContainerKind, StreamFormat};
use crate::codec::SampleBuffer;
use crate::error::{Error, Result};
use std::io::{Seek, Write};

/// Lifecycle of a muxer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxerState {
    /// Accepting sample writes
    Open,
    /// Header patching in progress, or failed part way
    Finalizing,
    /// Output complete; terminal
    Closed,
}

/// PCM container writer
///
/// The header is written with placeholder sizes at construction and only
/// patched by `finalize`, once the total length is known.
pub trait Muxer {
    /// Container format this muxer writes
    fn kind(&self) -> ContainerKind;

    /// Stream parameters fixed at construction
    fn stream_format(&self) -> StreamFormat;

    /// Current lifecycle state
    fn state(&self) -> MuxerState;

    /// Sample-frames appended so far
    fn frames_written(&self) -> u64;

    /// Append one buffer of interleaved samples to the data region.
    ///
    /// Fails with `InvalidState` unless the muxer is `Open`.
    fn write_samples(&mut self, buf: &SampleBuffer) -> Result<()>;

    /// Patch header sizes and flush.
    ///
    /// May be called once; the muxer is `Closed` afterwards.
    fn finalize(&mut self) -> Result<()>;
}

/// Shared bookkeeping for muxer lifecycle and incoming buffer checks
#[derive(Debug)]
pub struct MuxerContext {
    kind: ContainerKind,
    format: StreamFormat,
    state: MuxerState,
    frames_written: u64,
    data_bytes: u64,
}

impl MuxerContext {
    /// Create a new muxer context
    pub fn new(kind: ContainerKind, format: StreamFormat) -> Self {
        MuxerContext {
            kind,
            format,
            state: MuxerState::Open,
            frames_written: 0,
            data_bytes: 0,
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

    /// Get the lifecycle state
    pub fn state(&self) -> MuxerState {
        self.state
    }

    /// Sample-frames recorded so far
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Data-region bytes recorded so far
    pub fn data_bytes(&self) -> u64 {
        self.data_bytes
    }

    /// Check that a buffer may be written in the current state
    pub fn check_write(&self, buf: &SampleBuffer) -> Result<()> {
        if self.state != MuxerState::Open {
            return Err(Error::invalid_state(format!(
                "{} muxer is {:?}; no further writes permitted",
                self.kind, self.state
            )));
        }

        if buf.format() != self.format {
            return Err(Error::invalid_input(format!(
                "Buffer format ({}) does not match muxer format ({})",
                buf.format(),
                self.format
            )));
        }

        Ok(())
    }

    /// Check the data region stays within `limit` bytes after `additional`
    pub fn check_capacity(&self, additional: u64, limit: u64) -> Result<()> {
        if self.data_bytes + additional > limit {
            return Err(Error::invalid_input(format!(
                "{} data region would exceed {} bytes",
                self.kind, limit
            )));
        }
        Ok(())
    }

    /// Record a successful write
    pub fn record_write(&mut self, frames: u64, bytes: u64) {
        self.frames_written += frames;
        self.data_bytes += bytes;
    }

    /// Enter `Finalizing`, failing if finalize already ran
    pub fn begin_finalize(&mut self) -> Result<()> {
        if self.state != MuxerState::Open {
            return Err(Error::invalid_state(format!(
                "{} muxer already finalized",
                self.kind
            )));
        }
        self.state = MuxerState::Finalizing;
        Ok(())
    }

    /// Enter the terminal `Closed` state
    pub fn set_closed(&mut self) {
        self.state = MuxerState::Closed;
    }
}

/// Create a muxer for the given container kind
pub fn create_muxer<W>(
    kind: ContainerKind,
    writer: W,
    format: StreamFormat,
) -> Result<Box<dyn Muxer>>
where
    W: Write + Seek + 'static,
{
    match kind {
        ContainerKind::Wav => Ok(Box::new(WavMuxer::new(writer, format)?)),
        ContainerKind::Aiff => Ok(Box::new(AiffMuxer::new(writer, format)?)),
    }
}
