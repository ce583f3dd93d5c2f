//! AIFF audio format support
//!
//! Reads big-endian AIFF and uncompressed AIFF-C (`NONE`, `sowt`) and
//! writes plain AIFF.

pub mod demuxer;
pub mod extended;
pub mod header;
pub mod muxer;

pub use demuxer::AiffDemuxer;
pub use header::{AiffHeader, CommonChunk, Compression, FormType};
pub use muxer::AiffMuxer;

/// AIFF format magic numbers
pub const FORM_MAGIC: &[u8; 4] = b"FORM";
pub const AIFF_TYPE: &[u8; 4] = b"AIFF";
pub const AIFC_TYPE: &[u8; 4] = b"AIFC";
pub const COMM_CHUNK: &[u8; 4] = b"COMM";
pub const SSND_CHUNK: &[u8; 4] = b"SSND";
