//! Common test utilities for pcmconv integration tests
//!
//! This module provides builders for synthetic WAV and AIFF byte images and
//! helpers for generating and comparing sample data.

#![allow(dead_code)]

use pcmconv_lib::codec::SampleBuffer;
use pcmconv_lib::format::aiff::extended;
use pcmconv_lib::format::{create_muxer, ContainerKind, StreamFormat};
use std::io::{Read, Seek, SeekFrom};
use tempfile::NamedTempFile;

// ============================================================================
// Byte Image Builders
// ============================================================================

/// Pack interleaved samples as little-endian WAV data
pub fn wav_data(bit_depth: u16, samples: &[i32]) -> Vec<u8> {
    let mut out = Vec::new();
    for &s in samples {
        match bit_depth {
            8 => out.push((s + 128) as u8),
            16 => out.extend_from_slice(&(s as i16).to_le_bytes()),
            24 => out.extend_from_slice(&s.to_le_bytes()[..3]),
            32 => out.extend_from_slice(&s.to_le_bytes()),
            _ => panic!("unsupported test depth {}", bit_depth),
        }
    }
    out
}

/// Pack interleaved samples as big-endian AIFF data
pub fn aiff_data(bit_depth: u16, samples: &[i32]) -> Vec<u8> {
    let mut out = Vec::new();
    for &s in samples {
        match bit_depth {
            8 => out.push(s as i8 as u8),
            16 => out.extend_from_slice(&(s as i16).to_be_bytes()),
            24 => out.extend_from_slice(&s.to_be_bytes()[1..]),
            32 => out.extend_from_slice(&s.to_be_bytes()),
            _ => panic!("unsupported test depth {}", bit_depth),
        }
    }
    out
}

/// Build a RIFF/WAVE image from raw chunks
pub fn riff(chunks: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut body = b"WAVE".to_vec();
    for (id, data) in chunks {
        body.extend_from_slice(*id);
        body.extend_from_slice(&(data.len() as u32).to_le_bytes());
        body.extend_from_slice(data);
        if data.len() % 2 == 1 {
            body.push(0);
        }
    }
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

/// PCM fmt chunk body
pub fn fmt_chunk(format: StreamFormat) -> Vec<u8> {
    let block_align = format.channels * (format.bit_depth / 8);
    let mut out = Vec::new();
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&format.channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate.to_le_bytes());
    out.extend_from_slice(&(format.sample_rate * block_align as u32).to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&format.bit_depth.to_le_bytes());
    out
}

/// Minimal PCM WAV image
pub fn wav_file(format: StreamFormat, samples: &[i32]) -> Vec<u8> {
    riff(&[
        (b"fmt ", fmt_chunk(format)),
        (b"data", wav_data(format.bit_depth, samples)),
    ])
}

/// Build a FORM image from raw chunks
pub fn form(form_type: &[u8; 4], chunks: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut body = form_type.to_vec();
    for (id, data) in chunks {
        body.extend_from_slice(*id);
        body.extend_from_slice(&(data.len() as u32).to_be_bytes());
        body.extend_from_slice(data);
        if data.len() % 2 == 1 {
            body.push(0);
        }
    }
    let mut out = b"FORM".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(&body);
    out
}

/// COMM chunk body for plain AIFF
pub fn comm_chunk(format: StreamFormat, frames: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&format.channels.to_be_bytes());
    out.extend_from_slice(&frames.to_be_bytes());
    out.extend_from_slice(&format.bit_depth.to_be_bytes());
    out.extend_from_slice(&extended::encode(format.sample_rate));
    out
}

/// SSND chunk body with a zero offset
pub fn ssnd_chunk(data: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 8];
    out.extend_from_slice(data);
    out
}

/// Minimal AIFF image
pub fn aiff_file(format: StreamFormat, samples: &[i32]) -> Vec<u8> {
    let frames = (samples.len() / format.channels as usize) as u32;
    form(
        b"AIFF",
        &[
            (b"COMM", comm_chunk(format, frames)),
            (b"SSND", ssnd_chunk(&aiff_data(format.bit_depth, samples))),
        ],
    )
}

// ============================================================================
// Sample Generation
// ============================================================================

/// Deterministic samples spanning the full range of `bit_depth`
pub fn test_samples(bit_depth: u16, count: usize) -> Vec<i32> {
    let max = (1i64 << (bit_depth - 1)) - 1;
    let min = -(1i64 << (bit_depth - 1));
    let span = (max - min + 1) as u64;

    let mut state = 0x2545_F491_4F6C_DD1Du64;
    (0..count)
        .map(|i| match i % 8 {
            0 => max as i32,
            1 => min as i32,
            2 => 0,
            _ => {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (min + (state % span) as i64) as i32
            }
        })
        .collect()
}

/// Create garbage/malformed data for error handling tests
pub fn create_garbage_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 37 % 251) as u8).collect()
}

// ============================================================================
// File Helpers
// ============================================================================

/// Write `bytes` to a fresh temporary file
pub fn temp_file_with(bytes: &[u8]) -> NamedTempFile {
    use std::io::Write;
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Encode `samples` with the library muxer and return the file bytes
pub fn encode_with_muxer(kind: ContainerKind, format: StreamFormat, samples: &[i32]) -> Vec<u8> {
    let mut file = NamedTempFile::new().expect("create temp file");
    {
        let writer = file.reopen().expect("reopen temp file");
        let mut muxer = create_muxer(kind, writer, format).expect("create muxer");
        muxer
            .write_samples(&SampleBuffer::from_samples(format, samples.to_vec()))
            .expect("write samples");
        muxer.finalize().expect("finalize");
    }
    let mut bytes = Vec::new();
    file.seek(SeekFrom::Start(0)).expect("rewind");
    file.read_to_end(&mut bytes).expect("read temp file");
    bytes
}

// ============================================================================
// Test Constants
// ============================================================================

/// Supported bit depths
pub const BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// Standard audio parameters
pub const SAMPLE_RATES: [u32; 4] = [8000, 22050, 44100, 96000];
