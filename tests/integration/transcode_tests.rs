//! Transcoding integration tests for pcmconv
//!
//! Drives the chunked transcode loop and the file-level `convert` entry
//! point end to end.

use std::fs;
use std::io::Cursor;

use crate::common::*;
use pcmconv_lib::error::{Error, Stage};
use pcmconv_lib::format::aiff::AiffMuxer;
use pcmconv_lib::format::wav::WavMuxer;
use pcmconv_lib::format::{ContainerKind, Demuxer, Muxer, StreamFormat};
use pcmconv_lib::probe::FormatDetector;
use pcmconv_lib::{convert, ConvertConfig, Transcoder};
use tempfile::tempdir;

/// Decode a container image fully
fn decode(bytes: Vec<u8>) -> (ContainerKind, StreamFormat, Vec<i32>) {
    let mut demuxer = FormatDetector::open(Cursor::new(bytes)).unwrap();
    let samples = demuxer.read_all().unwrap().into_samples();
    (demuxer.kind(), demuxer.stream_format(), samples)
}

#[test]
fn test_concrete_wav_to_aiff() {
    let format = StreamFormat::new(8000, 16, 1);
    let samples = vec![100, -100, 32767, -32768, 0];
    let input = temp_file_with(&wav_file(format, &samples));
    let dir = tempdir().unwrap();
    let stem = dir.path().join("out");

    let config = ConvertConfig::new(input.path(), ContainerKind::Aiff)
        .with_output_stem(stem.to_string_lossy());
    let report = convert(config).unwrap();

    assert_eq!(report.source_format, ContainerKind::Wav);
    assert_eq!(report.output_path, dir.path().join("out.aiff"));
    assert_eq!(report.transcode.frames, 5);

    let (kind, out_format, out_samples) = decode(fs::read(&report.output_path).unwrap());
    assert_eq!(kind, ContainerKind::Aiff);
    assert_eq!(out_format.sample_rate, 8000);
    assert_eq!(out_format.bit_depth, 16);
    assert_eq!(out_format.channels, 1);
    assert_eq!(out_samples, samples);
}

#[test]
fn test_wav_aiff_wav_roundtrip_is_lossless() {
    let dir = tempdir().unwrap();

    for (bits, channels, rate) in [(8, 1, 8000), (16, 2, 44100), (24, 2, 96000), (32, 6, 22050)] {
        let format = StreamFormat::new(rate, bits, channels);
        let samples = test_samples(bits, channels as usize * 1001);
        let original = wav_file(format, &samples);
        let input = temp_file_with(&original);

        let aiff_stem = dir.path().join(format!("mid_{}", bits));
        let aiff = convert(
            ConvertConfig::new(input.path(), ContainerKind::Aiff)
                .with_output_stem(aiff_stem.to_string_lossy())
                .with_chunk_frames(100),
        )
        .unwrap();

        let wav_stem = dir.path().join(format!("back_{}", bits));
        let wav = convert(
            ConvertConfig::new(&aiff.output_path, ContainerKind::Wav)
                .with_output_stem(wav_stem.to_string_lossy())
                .with_chunk_frames(64),
        )
        .unwrap();

        let roundtrip = fs::read(&wav.output_path).unwrap();
        let (_, out_format, out_samples) = decode(roundtrip.clone());
        assert_eq!(out_format, format);
        assert_eq!(out_samples, samples);
        // Canonical input, so the bytes match too
        assert_eq!(roundtrip, original);
    }
}

#[test]
fn test_exact_multiple_chunk_count() {
    let format = StreamFormat::new(44100, 16, 2);
    let samples = test_samples(16, 2 * 256);
    let mut demuxer = FormatDetector::open(Cursor::new(wav_file(format, &samples))).unwrap();
    let mut muxer = AiffMuxer::new(Cursor::new(Vec::new()), format).unwrap();

    let report = Transcoder::new(64).unwrap().run(&mut demuxer, &mut muxer).unwrap();
    assert_eq!(report.chunks_written, 4);
    assert_eq!(report.reads, 5);
    assert_eq!(report.frames, 256);

    let (_, _, out) = decode(muxer.into_inner().into_inner());
    assert_eq!(out.len() / 2, 256);
    assert_eq!(out, samples);
}

#[test]
fn test_short_final_chunk() {
    let format = StreamFormat::new(8000, 24, 1);
    let samples = test_samples(24, 130);
    let mut demuxer = FormatDetector::open(Cursor::new(aiff_file(format, &samples))).unwrap();
    let mut muxer = WavMuxer::new(Cursor::new(Vec::new()), format).unwrap();

    let report = Transcoder::new(64).unwrap().run(&mut demuxer, &mut muxer).unwrap();
    // 64 + 64 + 2, no read after the short chunk
    assert_eq!(report.chunks_written, 3);
    assert_eq!(report.reads, 3);
    assert_eq!(muxer.frames_written(), 130);

    let (_, _, out) = decode(muxer.into_inner().into_inner());
    assert_eq!(out, samples);
}

#[test]
fn test_same_container_copy() {
    let format = StreamFormat::new(22050, 8, 2);
    let samples = test_samples(8, 2 * 50);
    let original = aiff_file(format, &samples);
    let input = temp_file_with(&original);
    let dir = tempdir().unwrap();

    let report = convert(
        ConvertConfig::new(input.path(), ContainerKind::Aiff)
            .with_output_stem(dir.path().join("copy").to_string_lossy()),
    )
    .unwrap();
    assert_eq!(fs::read(report.output_path).unwrap(), original);
}

#[test]
fn test_truncated_whole_buffer_decode() {
    let format = StreamFormat::new(8000, 16, 1);
    let mut bytes = wav_file(format, &[1, 2, 3, 4]);
    // Declare 8 frames in the data chunk, keep 4
    bytes[40..44].copy_from_slice(&16u32.to_le_bytes());

    let mut demuxer = FormatDetector::open(Cursor::new(bytes)).unwrap();
    assert!(matches!(
        demuxer.read_all(),
        Err(Error::TruncatedContainer {
            declared: 8,
            available: 4
        })
    ));
}

#[test]
fn test_unrecognized_input_fails_at_sniff() {
    let input = temp_file_with(&create_garbage_data(128));
    let dir = tempdir().unwrap();
    let stem = dir.path().join("never");

    let err = convert(
        ConvertConfig::new(input.path(), ContainerKind::Wav)
            .with_output_stem(stem.to_string_lossy()),
    )
    .unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Sniff));
    assert!(matches!(err.root(), Error::UnrecognizedContainer));
    assert!(!dir.path().join("never.wav").exists());
}

#[test]
fn test_missing_data_region_fails_at_decode() {
    let format = StreamFormat::new(8000, 16, 1);
    let input = temp_file_with(&riff(&[(b"fmt ", fmt_chunk(format))]));
    let dir = tempdir().unwrap();

    let err = convert(
        ConvertConfig::new(input.path(), ContainerKind::Aiff)
            .with_output_stem(dir.path().join("x").to_string_lossy()),
    )
    .unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Decode));
    assert!(matches!(err.root(), Error::MalformedContainer(_)));
}
