//! AIFF / AIFF-C header structures and parsing

use super::{extended, AIFC_TYPE, AIFF_TYPE, COMM_CHUNK, FORM_MAGIC, SSND_CHUNK};
use crate::error::{Error, Result};
use crate::format::wav::DataRegion;
use crate::format::{ChunkHeader, StreamFormat};
use crate::util::{Endianness, SampleFormat};
use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use tracing::{debug, warn};

/// FORM type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormType {
    /// Plain AIFF, always big-endian PCM
    Aiff,
    /// AIFF-C, compression named in COMM
    Aifc,
}

/// AIFF-C compression type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Uncompressed big-endian PCM (`NONE`, or plain AIFF)
    None,
    /// Uncompressed little-endian PCM (`sowt`)
    Sowt,
    /// Anything else
    Other([u8; 4]),
}

impl Compression {
    fn from_id(id: [u8; 4]) -> Self {
        match &id {
            b"NONE" | b"none" => Compression::None,
            b"sowt" => Compression::Sowt,
            _ => Compression::Other(id),
        }
    }

    /// Byte order of samples, if this is an uncompressed layout
    pub fn endianness(&self) -> Option<Endianness> {
        match self {
            Compression::None => Some(Endianness::Big),
            Compression::Sowt => Some(Endianness::Little),
            Compression::Other(_) => None,
        }
    }
}

/// COMM chunk data from AIFF header
#[derive(Debug, Clone, PartialEq)]
pub struct CommonChunk {
    /// Number of channels
    pub channels: u16,
    /// Declared sample-frames
    pub sample_frames: u32,
    /// Bits per sample
    pub sample_size: u16,
    /// Sample rate, as stored
    pub sample_rate: f64,
    /// Compression (always `None` for plain AIFF)
    pub compression: Compression,
}

impl CommonChunk {
    /// Parse a COMM chunk body
    pub fn from_bytes(data: &[u8], form_type: FormType) -> Result<Self> {
        if data.len() < 18 {
            return Err(Error::malformed("COMM chunk too small"));
        }

        let channels = BigEndian::read_u16(&data[0..2]);
        let sample_frames = BigEndian::read_u32(&data[2..6]);
        let sample_size = BigEndian::read_u16(&data[6..8]);

        let mut rate_bytes = [0u8; 10];
        rate_bytes.copy_from_slice(&data[8..18]);
        let sample_rate = extended::decode(&rate_bytes);

        let compression = match form_type {
            FormType::Aiff => Compression::None,
            FormType::Aifc => {
                if data.len() < 22 {
                    return Err(Error::malformed("AIFC COMM chunk missing compression type"));
                }
                let mut id = [0u8; 4];
                id.copy_from_slice(&data[18..22]);
                Compression::from_id(id)
            }
        };

        Ok(CommonChunk {
            channels,
            sample_frames,
            sample_size,
            sample_rate,
            compression,
        })
    }

    /// Convert to the 18-byte plain AIFF layout
    pub fn to_bytes(&self) -> [u8; 18] {
        let mut bytes = [0u8; 18];
        BigEndian::write_u16(&mut bytes[0..2], self.channels);
        BigEndian::write_u32(&mut bytes[2..6], self.sample_frames);
        BigEndian::write_u16(&mut bytes[6..8], self.sample_size);
        bytes[8..18].copy_from_slice(&extended::encode(self.sample_rate as u32));
        bytes
    }

    /// Validate and derive the stream format
    pub fn stream_format(&self) -> Result<StreamFormat> {
        if let Compression::Other(id) = self.compression {
            return Err(Error::unsupported(format!(
                "Unsupported AIFC compression '{}'",
                String::from_utf8_lossy(&id)
            )));
        }

        SampleFormat::from_bit_depth(self.sample_size)?;

        let rate = self.sample_rate.round();
        if !rate.is_finite() || rate < 1.0 || rate > u32::MAX as f64 {
            return Err(Error::malformed(format!(
                "Invalid sample rate: {}",
                self.sample_rate
            )));
        }
        if rate != self.sample_rate {
            warn!("Rounding fractional AIFF sample rate {}", self.sample_rate);
        }

        let format = StreamFormat::new(rate as u32, self.sample_size, self.channels);
        format.validate()?;
        Ok(format)
    }
}

/// Complete AIFF file header
#[derive(Debug, Clone)]
pub struct AiffHeader {
    /// FORM type
    pub form_type: FormType,
    /// Total file size (FORM chunk size + 8)
    pub file_size: u64,
    /// COMM chunk
    pub common: CommonChunk,
    /// Sample data inside the SSND chunk, if present
    pub sound: Option<DataRegion>,
}

impl AiffHeader {
    /// Read and parse an AIFF header from a reader
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let mut form_header = [0u8; 12];
        reader.read_exact(&mut form_header).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => Error::UnrecognizedContainer,
            _ => Error::Io(e),
        })?;

        if &form_header[0..4] != FORM_MAGIC {
            return Err(Error::UnrecognizedContainer);
        }

        let form_type = match &form_header[8..12] {
            t if t == AIFF_TYPE => FormType::Aiff,
            t if t == AIFC_TYPE => FormType::Aifc,
            _ => return Err(Error::UnrecognizedContainer),
        };

        let file_size = BigEndian::read_u32(&form_header[4..8]) as u64 + 8;

        let mut common = None;
        let mut sound = None;

        // COMM and SSND may come in either order
        while let Some(chunk) = ChunkHeader::read(reader, Endianness::Big)? {
            let body_start = reader.stream_position()?;

            match &chunk.id {
                COMM_CHUNK if common.is_none() => {
                    let data = chunk.read_body(reader)?;
                    common = Some(CommonChunk::from_bytes(&data, form_type)?);
                }
                SSND_CHUNK if sound.is_none() => {
                    if chunk.size < 8 {
                        return Err(Error::malformed("SSND chunk too small"));
                    }
                    let offset = reader.read_u32::<BigEndian>()?;
                    let _block_size = reader.read_u32::<BigEndian>()?;
                    let size = (chunk.size as u64 - 8).checked_sub(offset as u64).ok_or_else(|| {
                        Error::malformed(format!("SSND offset {} exceeds chunk size", offset))
                    })?;
                    sound = Some(DataRegion {
                        start: body_start + 8 + offset as u64,
                        size,
                    });
                }
                _ => {
                    debug!("Skipping AIFF chunk '{}' ({} bytes)", chunk.id_str(), chunk.size);
                }
            }

            if common.is_some() && sound.is_some() {
                break;
            }
            reader.seek(SeekFrom::Start(body_start + chunk.padded_size()))?;
        }

        let common = common.ok_or_else(|| Error::malformed("COMM chunk not found"))?;

        Ok(AiffHeader {
            form_type,
            file_size,
            common,
            sound,
        })
    }
}
