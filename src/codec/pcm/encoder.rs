//! PCM encoder implementation

use super::PcmConfig;
use crate::error::{Error, Result};
use crate::util::{Endianness, SampleFormat};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// PCM encoder
///
/// Turns interleaved `i32` samples back into data-region bytes.
pub struct PcmEncoder {
    config: PcmConfig,
}

impl PcmEncoder {
    /// Create a new PCM encoder
    pub fn new(config: PcmConfig) -> Self {
        PcmEncoder { config }
    }

    /// Codec configuration
    pub fn config(&self) -> &PcmConfig {
        &self.config
    }

    /// Encode one sample into exactly `bytes_per_sample` bytes
    fn encode_sample(&self, sample: i32, out: &mut [u8]) {
        match (self.config.sample_format, self.config.endianness) {
            (SampleFormat::S8, _) if self.config.unsigned_8bit => out[0] = (sample + 128) as u8,
            (SampleFormat::S8, _) => out[0] = sample as i8 as u8,
            (SampleFormat::S16, Endianness::Little) => LittleEndian::write_i16(out, sample as i16),
            (SampleFormat::S16, Endianness::Big) => BigEndian::write_i16(out, sample as i16),
            (SampleFormat::S24, Endianness::Little) => LittleEndian::write_i24(out, sample),
            (SampleFormat::S24, Endianness::Big) => BigEndian::write_i24(out, sample),
            (SampleFormat::S32, Endianness::Little) => LittleEndian::write_i32(out, sample),
            (SampleFormat::S32, Endianness::Big) => BigEndian::write_i32(out, sample),
        }
    }

    /// Append the encoded form of `samples` to `output`.
    ///
    /// Fails without writing anything if a sample does not fit the bit
    /// depth or the samples do not form whole frames.
    pub fn encode_into(&self, samples: &[i32], output: &mut Vec<u8>) -> Result<()> {
        let channels = self.config.channels as usize;
        if channels == 0 || samples.len() % channels != 0 {
            return Err(Error::invalid_input(format!(
                "{} samples do not form whole {}-channel frames",
                samples.len(),
                channels
            )));
        }

        let format = self.config.sample_format;
        if let Some((index, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| !format.contains(**s))
        {
            return Err(Error::invalid_input(format!(
                "Sample {} at index {} out of range for {}-bit PCM",
                sample,
                index,
                format.bit_depth()
            )));
        }

        let bytes_per_sample = self.config.bytes_per_sample();
        let start = output.len();
        output.resize(start + samples.len() * bytes_per_sample, 0);

        for (sample, chunk) in samples
            .iter()
            .zip(output[start..].chunks_exact_mut(bytes_per_sample))
        {
            self.encode_sample(*sample, chunk);
        }

        Ok(())
    }
}
