//! WAV audio format support
//!
//! This module implements RIFF/WAV file format parsing and writing.
//! WAV is a simple uncompressed audio format widely used for audio interchange.

pub mod demuxer;
pub mod header;
pub mod muxer;

pub use demuxer::WavDemuxer;
pub use header::{DataRegion, FormatTag, WavFormat, WavHeader};
pub use muxer::WavMuxer;

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK: &[u8; 4] = b"fmt ";
pub const DATA_CHUNK: &[u8; 4] = b"data";
