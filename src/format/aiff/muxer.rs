//! AIFF file muxer implementation

use super::header::{CommonChunk, Compression};
use super::{AIFF_TYPE, COMM_CHUNK, FORM_MAGIC, SSND_CHUNK};
use crate::codec::{PcmConfig, PcmEncoder, SampleBuffer};
use crate::error::{Error, Result};
use crate::format::{ContainerKind, Muxer, MuxerContext, MuxerState, StreamFormat};
use crate::util::Endianness;
use std::io::{Seek, SeekFrom, Write};
use tracing::debug;

/// COMM body size for plain AIFF
const COMM_SIZE: u32 = 18;

/// AIFF file muxer
///
/// Always writes plain big-endian AIFF with a zero SSND offset.
pub struct AiffMuxer<W: Write + Seek> {
    writer: W,
    context: MuxerContext,
    encoder: PcmEncoder,
    form_size_position: u64,
    frames_position: u64,
    ssnd_size_position: u64,
    scratch: Vec<u8>,
}

impl<W: Write + Seek> AiffMuxer<W> {
    /// Create an AIFF muxer and write the header with placeholder sizes
    pub fn new(mut writer: W, format: StreamFormat) -> Result<Self> {
        format.validate()?;
        let encoder = PcmEncoder::new(PcmConfig::aiff(&format, Endianness::Big)?);

        let common = CommonChunk {
            channels: format.channels,
            sample_frames: 0,
            sample_size: format.bit_depth,
            sample_rate: format.sample_rate as f64,
            compression: Compression::None,
        };

        let start = writer.stream_position()?;

        writer.write_all(FORM_MAGIC)?;
        writer.write_all(&0u32.to_be_bytes())?;
        writer.write_all(AIFF_TYPE)?;

        writer.write_all(COMM_CHUNK)?;
        writer.write_all(&COMM_SIZE.to_be_bytes())?;
        writer.write_all(&common.to_bytes())?;

        writer.write_all(SSND_CHUNK)?;
        writer.write_all(&0u32.to_be_bytes())?;
        // offset, block size
        writer.write_all(&[0u8; 8])?;

        debug!("Wrote AIFF header for {}", format);

        Ok(AiffMuxer {
            writer,
            context: MuxerContext::new(ContainerKind::Aiff, format),
            encoder,
            form_size_position: start + 4,
            frames_position: start + 12 + 8 + 2,
            ssnd_size_position: start + 12 + 8 + COMM_SIZE as u64 + 4,
            scratch: Vec::new(),
        })
    }

    /// Release the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Largest data region the 32-bit FORM size can describe
    fn data_limit(&self) -> u64 {
        u32::MAX as u64 - (4 + 8 + COMM_SIZE as u64 + 8 + 8 + 1)
    }
}

impl<W: Write + Seek> Muxer for AiffMuxer<W> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Aiff
    }

    fn stream_format(&self) -> StreamFormat {
        self.context.format()
    }

    fn state(&self) -> MuxerState {
        self.context.state()
    }

    fn frames_written(&self) -> u64 {
        self.context.frames_written()
    }

    fn write_samples(&mut self, buf: &SampleBuffer) -> Result<()> {
        self.context.check_write(buf)?;

        self.scratch.clear();
        self.encoder.encode_into(buf.samples(), &mut self.scratch)?;
        self.context
            .check_capacity(self.scratch.len() as u64, self.data_limit())?;
        if self.context.frames_written() + buf.num_frames() as u64 > u32::MAX as u64 {
            return Err(Error::invalid_input("AIFF frame count exceeds 32 bits"));
        }

        self.writer.write_all(&self.scratch)?;
        self.context
            .record_write(buf.num_frames() as u64, self.scratch.len() as u64);

        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.context.begin_finalize()?;

        let data_size = self.context.data_bytes();
        let pad = data_size & 1;
        if pad == 1 {
            self.writer.write_all(&[0])?;
        }

        // FORM size = 4 (AIFF) + 8 + COMM + 8 (SSND header) + 8 (offset/block) + data + pad
        let form_size = 4 + 8 + COMM_SIZE as u64 + 8 + 8 + data_size + pad;
        let ssnd_size = 8 + data_size;
        let frames = self.context.frames_written();

        self.writer.seek(SeekFrom::Start(self.form_size_position))?;
        self.writer.write_all(&(form_size as u32).to_be_bytes())?;

        self.writer.seek(SeekFrom::Start(self.frames_position))?;
        self.writer.write_all(&(frames as u32).to_be_bytes())?;

        self.writer.seek(SeekFrom::Start(self.ssnd_size_position))?;
        self.writer.write_all(&(ssnd_size as u32).to_be_bytes())?;

        self.writer.seek(SeekFrom::End(0))?;
        self.writer.flush()?;

        self.context.set_closed();
        debug!("Finalized AIFF: {} frames, {} data bytes", frames, data_size);
        Ok(())
    }
}
