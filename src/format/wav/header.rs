//! WAV file header structures and parsing

use super::{DATA_CHUNK, FMT_CHUNK, RIFF_MAGIC, WAVE_MAGIC};
use crate::error::{Error, Result};
use crate::format::{ChunkHeader, StreamFormat};
use crate::util::{Endianness, SampleFormat};
use byteorder::{ByteOrder, LittleEndian};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use tracing::{debug, warn};

/// WAV format tag identifying the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// PCM (uncompressed)
    Pcm,
    /// IEEE Float
    IeeeFloat,
    /// A-Law
    ALaw,
    /// Mu-Law
    MuLaw,
    /// Extensible format
    Extensible,
    /// Unknown format
    Unknown(u16),
}

impl From<u16> for FormatTag {
    fn from(val: u16) -> Self {
        match val {
            0x0001 => FormatTag::Pcm,
            0x0003 => FormatTag::IeeeFloat,
            0x0006 => FormatTag::ALaw,
            0x0007 => FormatTag::MuLaw,
            0xFFFE => FormatTag::Extensible,
            other => FormatTag::Unknown(other),
        }
    }
}

impl From<FormatTag> for u16 {
    fn from(tag: FormatTag) -> Self {
        match tag {
            FormatTag::Pcm => 0x0001,
            FormatTag::IeeeFloat => 0x0003,
            FormatTag::ALaw => 0x0006,
            FormatTag::MuLaw => 0x0007,
            FormatTag::Extensible => 0xFFFE,
            FormatTag::Unknown(val) => val,
        }
    }
}

/// WAV format chunk data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavFormat {
    /// Format tag (codec ID)
    pub format_tag: FormatTag,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Block alignment
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Extension size (for extensible format)
    pub extension_size: Option<u16>,
    /// Codec named by the extensible sub-format GUID
    pub sub_format: Option<FormatTag>,
}

impl WavFormat {
    /// Build the plain PCM fmt chunk for a stream
    pub fn pcm(format: &StreamFormat) -> Self {
        WavFormat {
            format_tag: FormatTag::Pcm,
            channels: format.channels,
            sample_rate: format.sample_rate,
            byte_rate: format.byte_rate() as u32,
            block_align: format.block_align() as u16,
            bits_per_sample: format.bit_depth,
            extension_size: None,
            sub_format: None,
        }
    }

    /// Parse WAV format chunk from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 16 {
            return Err(Error::malformed("WAV format chunk too small"));
        }

        let format_tag: FormatTag = LittleEndian::read_u16(&data[0..2]).into();
        let channels = LittleEndian::read_u16(&data[2..4]);
        let sample_rate = LittleEndian::read_u32(&data[4..8]);
        let byte_rate = LittleEndian::read_u32(&data[8..12]);
        let block_align = LittleEndian::read_u16(&data[12..14]);
        let bits_per_sample = LittleEndian::read_u16(&data[14..16]);

        let extension_size = if data.len() >= 18 {
            Some(LittleEndian::read_u16(&data[16..18]))
        } else {
            None
        };

        // WAVE_FORMAT_EXTENSIBLE carries the real codec in the first two
        // bytes of the sub-format GUID at offset 24
        let sub_format = match format_tag {
            FormatTag::Extensible if data.len() >= 40 => {
                Some(LittleEndian::read_u16(&data[24..26]).into())
            }
            FormatTag::Extensible => {
                return Err(Error::malformed("Extensible fmt chunk missing sub-format"));
            }
            _ => None,
        };

        Ok(WavFormat {
            format_tag,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
            extension_size,
            sub_format,
        })
    }

    /// Convert to bytes for writing
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; 16];

        LittleEndian::write_u16(&mut bytes[0..2], self.format_tag.into());
        LittleEndian::write_u16(&mut bytes[2..4], self.channels);
        LittleEndian::write_u32(&mut bytes[4..8], self.sample_rate);
        LittleEndian::write_u32(&mut bytes[8..12], self.byte_rate);
        LittleEndian::write_u16(&mut bytes[12..14], self.block_align);
        LittleEndian::write_u16(&mut bytes[14..16], self.bits_per_sample);

        if let Some(ext_size) = self.extension_size {
            bytes.extend_from_slice(&ext_size.to_le_bytes());
        }

        bytes
    }

    /// Codec after resolving the extensible sub-format
    pub fn effective_tag(&self) -> FormatTag {
        match (self.format_tag, self.sub_format) {
            (FormatTag::Extensible, Some(sub)) => sub,
            (tag, _) => tag,
        }
    }

    /// Calculate expected block alignment
    pub fn calculate_block_align(&self) -> u16 {
        self.channels * self.bits_per_sample.div_ceil(8)
    }

    /// Validate format parameters and derive the stream format
    pub fn stream_format(&self) -> Result<StreamFormat> {
        let tag = self.effective_tag();
        if tag != FormatTag::Pcm {
            return Err(Error::unsupported(format!(
                "Unsupported WAV encoding: {:?}",
                tag
            )));
        }

        SampleFormat::from_bit_depth(self.bits_per_sample)?;

        let format = StreamFormat::new(self.sample_rate, self.bits_per_sample, self.channels);
        format.validate()?;

        let expected_block_align = self.calculate_block_align();
        if self.block_align != expected_block_align {
            return Err(Error::malformed(format!(
                "Block align mismatch: expected {}, got {}",
                expected_block_align, self.block_align
            )));
        }

        if self.byte_rate as u64 != format.byte_rate() {
            warn!(
                "WAV byte rate {} disagrees with computed {}",
                self.byte_rate,
                format.byte_rate()
            );
        }

        Ok(format)
    }
}

/// Location of a PCM data region in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRegion {
    /// Absolute offset of the first sample byte
    pub start: u64,
    /// Declared size in bytes
    pub size: u64,
}

/// Complete WAV file header
#[derive(Debug, Clone)]
pub struct WavHeader {
    /// Total file size (RIFF chunk size + 8)
    pub file_size: u64,
    /// WAV format information
    pub format: WavFormat,
    /// Data chunk, if present
    pub data: Option<DataRegion>,
}

impl WavHeader {
    /// Read and parse WAV header from a reader
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        // Read RIFF header
        let mut riff_header = [0u8; 12];
        reader.read_exact(&mut riff_header).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => Error::UnrecognizedContainer,
            _ => Error::Io(e),
        })?;

        if &riff_header[0..4] != RIFF_MAGIC || &riff_header[8..12] != WAVE_MAGIC {
            return Err(Error::UnrecognizedContainer);
        }

        let file_size = LittleEndian::read_u32(&riff_header[4..8]) as u64 + 8;

        let mut format = None;
        let mut data = None;

        while let Some(chunk) = ChunkHeader::read(reader, Endianness::Little)? {
            let body_start = reader.stream_position()?;

            match &chunk.id {
                FMT_CHUNK if format.is_none() => {
                    let fmt_data = chunk.read_body(reader)?;
                    format = Some(WavFormat::from_bytes(&fmt_data)?);
                    reader.seek(SeekFrom::Start(body_start + chunk.padded_size()))?;
                }
                DATA_CHUNK if data.is_none() => {
                    data = Some(DataRegion {
                        start: body_start,
                        size: chunk.size as u64,
                    });
                    if format.is_some() {
                        break;
                    }
                    chunk.skip(reader)?;
                }
                _ => {
                    debug!("Skipping WAV chunk '{}' ({} bytes)", chunk.id_str(), chunk.size);
                    chunk.skip(reader)?;
                }
            }
        }

        let format = format.ok_or_else(|| Error::malformed("fmt chunk not found"))?;

        Ok(WavHeader {
            file_size,
            format,
            data,
        })
    }

    /// Get total number of sample-frames declared by the data chunk
    pub fn num_frames(&self) -> u64 {
        match (self.data, self.format.block_align) {
            (Some(region), align) if align > 0 => region.size / align as u64,
            _ => 0,
        }
    }
}
