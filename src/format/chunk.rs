//! IFF-style chunk headers shared by RIFF (WAV) and FORM (AIFF)

use crate::error::{Error, Result};
use crate::util::Endianness;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Largest header chunk body (fmt, COMM) read into memory
pub const MAX_HEADER_CHUNK_SIZE: u32 = 64 * 1024;

/// Chunk header (4 byte ID + 4 byte size)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: [u8; 4],
    pub size: u32,
}

impl ChunkHeader {
    /// Read a chunk header from bytes
    pub fn from_bytes(bytes: &[u8], endianness: Endianness) -> Option<Self> {
        if bytes.len() < 8 {
            return None;
        }

        let mut id = [0u8; 4];
        id.copy_from_slice(&bytes[0..4]);

        let size = match endianness {
            Endianness::Little => LittleEndian::read_u32(&bytes[4..8]),
            Endianness::Big => BigEndian::read_u32(&bytes[4..8]),
        };

        Some(ChunkHeader { id, size })
    }

    /// Convert chunk header to bytes
    pub fn to_bytes(&self, endianness: Endianness) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..4].copy_from_slice(&self.id);
        match endianness {
            Endianness::Little => LittleEndian::write_u32(&mut bytes[4..8], self.size),
            Endianness::Big => BigEndian::write_u32(&mut bytes[4..8], self.size),
        }
        bytes
    }

    /// Read the next chunk header, or `None` once the stream is exhausted
    pub fn read<R: Read>(reader: &mut R, endianness: Endianness) -> Result<Option<Self>> {
        let mut bytes = [0u8; 8];
        match reader.read_exact(&mut bytes) {
            Ok(()) => Ok(Self::from_bytes(&bytes, endianness)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Chunk body size including the pad byte after odd-sized bodies
    pub fn padded_size(&self) -> u64 {
        self.size as u64 + (self.size as u64 & 1)
    }

    /// Printable chunk ID
    pub fn id_str(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }

    /// Read a header chunk body into memory.
    ///
    /// Fails with `MalformedContainer` if the declared size exceeds
    /// [`MAX_HEADER_CHUNK_SIZE`] or the body is cut short.
    pub fn read_body<R: Read>(&self, reader: &mut R) -> Result<Vec<u8>> {
        if self.size > MAX_HEADER_CHUNK_SIZE {
            return Err(Error::malformed(format!(
                "{} chunk declares {} bytes",
                self.id_str().trim_end(),
                self.size
            )));
        }

        let mut body = vec![0u8; self.size as usize];
        reader.read_exact(&mut body).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => {
                Error::malformed(format!("{} chunk truncated", self.id_str().trim_end()))
            }
            _ => Error::Io(e),
        })?;
        Ok(body)
    }

    /// Seek past this chunk's body (and pad byte), relative to the body start
    pub fn skip<R: Seek>(&self, reader: &mut R) -> Result<()> {
        reader.seek(SeekFrom::Current(self.padded_size() as i64))?;
        Ok(())
    }
}
