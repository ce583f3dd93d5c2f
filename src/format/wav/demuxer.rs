//! WAV file demuxer implementation

use super::header::WavHeader;
use crate::codec::{PcmConfig, SampleBuffer};
use crate::error::Result;
use crate::format::{ContainerKind, Demuxer, DemuxerContext, StreamFormat};
use std::io::{Read, Seek};
use tracing::{debug, warn};

/// WAV demuxer
pub struct WavDemuxer<R> {
    reader: R,
    context: DemuxerContext,
}

impl<R: Read + Seek> WavDemuxer<R> {
    /// Parse the RIFF header from `reader`, which must be at the file start.
    ///
    /// The read position is left somewhere in the header; the first
    /// `read_samples` call (or an explicit `seek_to_pcm`) moves it to the
    /// data chunk.
    pub fn new(mut reader: R) -> Result<Self> {
        let header = WavHeader::read(&mut reader)?;
        let format = header.format.stream_format()?;
        let config = PcmConfig::wav(&format)?;

        if let Some(data) = header.data {
            if data.size % format.block_align() as u64 != 0 {
                warn!(
                    "WAV data chunk size {} is not a multiple of block align {}",
                    data.size,
                    format.block_align()
                );
            }
        }

        let total_frames = header.num_frames();
        debug!("Opened WAV: {}, {} frames", format, total_frames);

        let context = DemuxerContext::new(
            ContainerKind::Wav,
            format,
            config,
            header.data,
            total_frames,
        );

        Ok(WavDemuxer { reader, context })
    }

    /// Release the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> Demuxer for WavDemuxer<R> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Wav
    }

    fn stream_format(&self) -> StreamFormat {
        self.context.format()
    }

    fn total_frames(&self) -> u64 {
        self.context.total_frames()
    }

    fn frames_read(&self) -> u64 {
        self.context.frames_read()
    }

    fn pcm_accessed(&self) -> bool {
        self.context.pcm_accessed()
    }

    fn available_frames(&self) -> u64 {
        self.context.available_frames()
    }

    fn seek_to_pcm(&mut self) -> Result<()> {
        self.context.seek_to_pcm(&mut self.reader)
    }

    fn read_samples(&mut self, buf: &mut SampleBuffer) -> Result<usize> {
        self.context.read_samples(&mut self.reader, buf)
    }
}
