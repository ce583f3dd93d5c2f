//! WAV file muxer implementation

use super::header::WavFormat;
use super::{DATA_CHUNK, FMT_CHUNK, RIFF_MAGIC, WAVE_MAGIC};
use crate::codec::{PcmConfig, PcmEncoder, SampleBuffer};
use crate::error::Result;
use crate::format::{ContainerKind, Muxer, MuxerContext, MuxerState, StreamFormat};
use std::io::{Seek, SeekFrom, Write};
use tracing::debug;

/// WAV file muxer
pub struct WavMuxer<W: Write + Seek> {
    writer: W,
    context: MuxerContext,
    encoder: PcmEncoder,
    fmt_size: u32,
    riff_size_position: u64,
    data_size_position: u64,
    scratch: Vec<u8>,
}

impl<W: Write + Seek> WavMuxer<W> {
    /// Create a WAV muxer and write the header with placeholder sizes
    pub fn new(mut writer: W, format: StreamFormat) -> Result<Self> {
        format.validate()?;
        let encoder = PcmEncoder::new(PcmConfig::wav(&format)?);
        let fmt_data = WavFormat::pcm(&format).to_bytes();

        let start = writer.stream_position()?;

        writer.write_all(RIFF_MAGIC)?;
        // Placeholder file size, patched in finalize
        writer.write_all(&0u32.to_le_bytes())?;
        writer.write_all(WAVE_MAGIC)?;

        writer.write_all(FMT_CHUNK)?;
        writer.write_all(&(fmt_data.len() as u32).to_le_bytes())?;
        writer.write_all(&fmt_data)?;

        writer.write_all(DATA_CHUNK)?;
        // Placeholder data size, patched in finalize
        writer.write_all(&0u32.to_le_bytes())?;

        let fmt_size = fmt_data.len() as u32;
        debug!("Wrote WAV header for {}", format);

        Ok(WavMuxer {
            writer,
            context: MuxerContext::new(ContainerKind::Wav, format),
            encoder,
            fmt_size,
            riff_size_position: start + 4,
            data_size_position: start + 12 + 8 + fmt_size as u64 + 4,
            scratch: Vec::new(),
        })
    }

    /// Release the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Largest data region the 32-bit RIFF size fields can describe
    fn data_limit(&self) -> u64 {
        u32::MAX as u64 - (4 + 8 + self.fmt_size as u64 + 8 + 1)
    }
}

impl<W: Write + Seek> Muxer for WavMuxer<W> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Wav
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

        // RIFF size = 4 (WAVE) + 8 (fmt header) + fmt_data_size + 8 (data header) + data_size + pad
        let riff_size = 4 + 8 + self.fmt_size as u64 + 8 + data_size + pad;

        self.writer.seek(SeekFrom::Start(self.riff_size_position))?;
        self.writer.write_all(&(riff_size as u32).to_le_bytes())?;

        self.writer.seek(SeekFrom::Start(self.data_size_position))?;
        self.writer.write_all(&(data_size as u32).to_le_bytes())?;

        self.writer.seek(SeekFrom::End(0))?;
        self.writer.flush()?;

        self.context.set_closed();
        debug!(
            "Finalized WAV: {} frames, {} data bytes",
            self.context.frames_written(),
            data_size
        );
        Ok(())
    }
}
