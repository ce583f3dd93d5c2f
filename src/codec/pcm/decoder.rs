//! PCM decoder implementation

use super::PcmConfig;
use crate::util::{Endianness, SampleFormat};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{self, ErrorKind, Read};

/// PCM decoder
///
/// Turns raw data-region bytes into interleaved `i32` samples. Owns a
/// scratch byte buffer that is reused across reads.
pub struct PcmDecoder {
    config: PcmConfig,
    scratch: Vec<u8>,
}

impl PcmDecoder {
    /// Create a new PCM decoder
    pub fn new(config: PcmConfig) -> Self {
        PcmDecoder {
            config,
            scratch: Vec::new(),
        }
    }

    /// Codec configuration
    pub fn config(&self) -> &PcmConfig {
        &self.config
    }

    /// Decode a single sample from exactly `bytes_per_sample` bytes
    pub fn decode_sample(&self, bytes: &[u8]) -> i32 {
        match (self.config.sample_format, self.config.endianness) {
            (SampleFormat::S8, _) if self.config.unsigned_8bit => bytes[0] as i32 - 128,
            (SampleFormat::S8, _) => bytes[0] as i8 as i32,
            (SampleFormat::S16, Endianness::Little) => LittleEndian::read_i16(bytes) as i32,
            (SampleFormat::S16, Endianness::Big) => BigEndian::read_i16(bytes) as i32,
            (SampleFormat::S24, Endianness::Little) => LittleEndian::read_i24(bytes),
            (SampleFormat::S24, Endianness::Big) => BigEndian::read_i24(bytes),
            (SampleFormat::S32, Endianness::Little) => LittleEndian::read_i32(bytes),
            (SampleFormat::S32, Endianness::Big) => BigEndian::read_i32(bytes),
        }
    }

    /// Decode whole frames from `data` into the front of `out`.
    ///
    /// Returns the number of frames written. Stops at whichever of `data`
    /// or `out` runs out first; trailing partial frames are ignored.
    pub fn decode_into(&self, data: &[u8], out: &mut [i32]) -> usize {
        let bytes_per_sample = self.config.bytes_per_sample();
        let channels = self.config.channels as usize;
        if bytes_per_sample == 0 || channels == 0 {
            return 0;
        }

        let frames = self
            .config
            .frames_from_bytes(data.len())
            .min(out.len() / channels);
        let samples = frames * channels;

        for (slot, chunk) in out[..samples]
            .iter_mut()
            .zip(data.chunks_exact(bytes_per_sample))
        {
            *slot = self.decode_sample(chunk);
        }

        frames
    }

    /// Read up to `out.len() / channels` frames from `reader` and decode them.
    ///
    /// A short count means the reader hit end of file.
    pub fn read_frames<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        out: &mut [i32],
    ) -> io::Result<usize> {
        let channels = self.config.channels as usize;
        if channels == 0 {
            return Ok(0);
        }
        let want = (out.len() / channels) * self.config.bytes_per_frame();
        if self.scratch.len() < want {
            self.scratch.resize(want, 0);
        }

        let mut filled = 0;
        while filled < want {
            match reader.read(&mut self.scratch[filled..want]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(self.decode_into(&self.scratch[..filled], out))
    }
}
