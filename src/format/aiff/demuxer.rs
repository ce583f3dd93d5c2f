//! AIFF file demuxer implementation

use super::header::AiffHeader;
use crate::codec::{PcmConfig, SampleBuffer};
use crate::error::{Error, Result};
use crate::format::{ContainerKind, Demuxer, DemuxerContext, StreamFormat};
use std::io::{Read, Seek};
use tracing::{debug, warn};

/// AIFF / AIFF-C demuxer
pub struct AiffDemuxer<R> {
    reader: R,
    context: DemuxerContext,
}

impl<R: Read + Seek> AiffDemuxer<R> {
    /// Parse the FORM header from `reader`, which must be at the file start
    pub fn new(mut reader: R) -> Result<Self> {
        let header = AiffHeader::read(&mut reader)?;
        let format = header.common.stream_format()?;
        let endianness = header
            .common
            .compression
            .endianness()
            .ok_or_else(|| Error::unsupported("Compressed AIFF-C data"))?;
        let config = PcmConfig::aiff(&format, endianness)?;

        let total_frames = header.common.sample_frames as u64;
        if let Some(sound) = header.sound {
            let expected = total_frames * format.block_align() as u64;
            if sound.size < expected {
                warn!(
                    "AIFF SSND holds {} bytes, COMM declares {} frames ({} bytes)",
                    sound.size, total_frames, expected
                );
            }
        }

        debug!(
            "Opened AIFF ({:?}, {}): {}, {} frames",
            header.form_type, endianness, format, total_frames
        );

        let context = DemuxerContext::new(
            ContainerKind::Aiff,
            format,
            config,
            header.sound,
            total_frames,
        );

        Ok(AiffDemuxer { reader, context })
    }

    /// Release the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> Demuxer for AiffDemuxer<R> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Aiff
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
