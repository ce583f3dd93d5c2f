//! Container format integration tests for pcmconv
//!
//! Tests muxer/demuxer round-trips for WAV and AIFF. Each test creates
//! sample data, muxes it to a container, demuxes it, and verifies the data
//! matches.

use std::io::Cursor;

use crate::common::*;
use pcmconv_lib::codec::SampleBuffer;
use pcmconv_lib::error::Error;
use pcmconv_lib::format::{ContainerKind, Demuxer, StreamFormat};
use pcmconv_lib::probe::{FormatDetector, ProbedDemuxer};

// ============================================================================
// WAV Format Tests
// ============================================================================

mod wav_tests {
    use super::*;
    use pcmconv_lib::format::wav::{WavDemuxer, WavMuxer};
    use pcmconv_lib::format::Muxer;

    #[test]
    fn test_wav_roundtrip_all_depths() {
        for bits in BIT_DEPTHS {
            let format = StreamFormat::new(44100, bits, 2);
            let samples = test_samples(bits, 64);

            let mut muxer = WavMuxer::new(Cursor::new(Vec::new()), format).unwrap();
            muxer
                .write_samples(&SampleBuffer::from_samples(format, samples.clone()))
                .unwrap();
            muxer.finalize().unwrap();
            let bytes = muxer.into_inner().into_inner();

            assert_eq!(bytes.len(), 44 + wav_data(bits, &samples).len());

            let mut demuxer = WavDemuxer::new(Cursor::new(bytes)).unwrap();
            assert_eq!(demuxer.stream_format(), format);
            assert_eq!(demuxer.read_all().unwrap().samples(), &samples[..]);
        }
    }

    #[test]
    fn test_wav_muxer_matches_reference_image() {
        let format = StreamFormat::new(22050, 16, 1);
        let samples = test_samples(16, 10);
        let bytes = encode_with_muxer(ContainerKind::Wav, format, &samples);
        assert_eq!(bytes, wav_file(format, &samples));
    }

    #[test]
    fn test_wav_skips_unknown_chunks() {
        let format = StreamFormat::new(8000, 16, 1);
        let bytes = riff(&[
            (b"JUNK", vec![0xAA; 3]),
            (b"fmt ", fmt_chunk(format)),
            (b"LIST", b"INFOISFT\x04\x00\x00\x00test".to_vec()),
            (b"data", wav_data(16, &[7, -7])),
        ]);
        let mut demuxer = WavDemuxer::new(Cursor::new(bytes)).unwrap();
        assert_eq!(demuxer.read_all().unwrap().samples(), &[7, -7]);
    }

    #[test]
    fn test_wav_non_pcm_rejected() {
        let mut fmt = fmt_chunk(StreamFormat::new(8000, 16, 1));
        // IEEE float
        fmt[0] = 3;
        let bytes = riff(&[(b"fmt ", fmt), (b"data", vec![0; 4])]);
        assert!(matches!(
            WavDemuxer::new(Cursor::new(bytes)),
            Err(Error::Unsupported(_))
        ));
    }
}

// ============================================================================
// AIFF Format Tests
// ============================================================================

mod aiff_tests {
    use super::*;
    use pcmconv_lib::format::aiff::{AiffDemuxer, AiffMuxer};
    use pcmconv_lib::format::Muxer;

    #[test]
    fn test_aiff_roundtrip_all_depths() {
        for bits in BIT_DEPTHS {
            let format = StreamFormat::new(48000, bits, 3);
            let samples = test_samples(bits, 3 * 21);

            let mut muxer = AiffMuxer::new(Cursor::new(Vec::new()), format).unwrap();
            muxer
                .write_samples(&SampleBuffer::from_samples(format, samples.clone()))
                .unwrap();
            muxer.finalize().unwrap();
            let bytes = muxer.into_inner().into_inner();

            let mut demuxer = AiffDemuxer::new(Cursor::new(bytes)).unwrap();
            assert_eq!(demuxer.stream_format(), format);
            assert_eq!(demuxer.total_frames(), 21);
            assert_eq!(demuxer.read_all().unwrap().samples(), &samples[..]);
        }
    }

    #[test]
    fn test_aiff_muxer_matches_reference_image() {
        let format = StreamFormat::new(44100, 24, 2);
        let samples = test_samples(24, 12);
        let bytes = encode_with_muxer(ContainerKind::Aiff, format, &samples);
        assert_eq!(bytes, aiff_file(format, &samples));
    }

    #[test]
    fn test_aiff_comm_after_ssnd() {
        let format = StreamFormat::new(11025, 8, 1);
        let bytes = form(
            b"AIFF",
            &[
                (b"SSND", ssnd_chunk(&aiff_data(8, &[-5, 5, 0]))),
                (b"COMM", comm_chunk(format, 3)),
            ],
        );
        let mut demuxer = AiffDemuxer::new(Cursor::new(bytes)).unwrap();
        assert_eq!(demuxer.stream_format(), format);
        assert_eq!(demuxer.read_all().unwrap().samples(), &[-5, 5, 0]);
    }
}

// ============================================================================
// Detection Tests
// ============================================================================

mod detection_tests {
    use super::*;

    #[test]
    fn test_detects_each_container() {
        let format = StreamFormat::new(8000, 16, 1);
        let wav = wav_file(format, &[1, 2]);
        let aiff = aiff_file(format, &[1, 2]);

        assert_eq!(
            FormatDetector::detect(&mut Cursor::new(wav.clone())).unwrap(),
            ContainerKind::Wav
        );
        assert_eq!(
            FormatDetector::detect(&mut Cursor::new(aiff.clone())).unwrap(),
            ContainerKind::Aiff
        );

        assert!(matches!(
            FormatDetector::open(Cursor::new(wav)).unwrap(),
            ProbedDemuxer::Wav(_)
        ));
        assert!(matches!(
            FormatDetector::open(Cursor::new(aiff)).unwrap(),
            ProbedDemuxer::Aiff(_)
        ));
    }

    #[test]
    fn test_wav_with_aiff_lookalike_payload_stays_wav() {
        // A WAV whose data chunk begins with a FORM/AIFF signature
        let format = StreamFormat::new(8000, 8, 1);
        let mut bytes = riff(&[
            (b"fmt ", fmt_chunk(format)),
            (b"data", b"FORM\x00\x00\x00\x00AIFF".to_vec()),
        ]);
        assert_eq!(
            FormatDetector::detect(&mut Cursor::new(bytes.clone())).unwrap(),
            ContainerKind::Wav
        );

        // An AIFF whose first chunk id reads "WAVE" is still AIFF
        bytes = form(b"AIFF", &[(b"COMM", comm_chunk(format, 0))]);
        bytes[12..16].copy_from_slice(b"WAVE");
        assert_eq!(
            FormatDetector::detect(&mut Cursor::new(bytes)).unwrap(),
            ContainerKind::Aiff
        );
    }

    #[test]
    fn test_neither_signature() {
        for bytes in [
            create_garbage_data(256),
            b"RIFF\x00\x00\x00\x00AVI LIST".to_vec(),
            b"FORM\x00\x00\x00\x008SVXVHDR".to_vec(),
            Vec::new(),
        ] {
            assert!(matches!(
                FormatDetector::detect(&mut Cursor::new(bytes)),
                Err(Error::UnrecognizedContainer)
            ));
        }
    }

    #[test]
    fn test_probed_duration() {
        let format = StreamFormat::new(8000, 16, 2);
        let demuxer =
            FormatDetector::open(Cursor::new(aiff_file(format, &vec![0; 2 * 4000]))).unwrap();
        assert_eq!(demuxer.total_frames(), 4000);
        assert_eq!(demuxer.duration_seconds(), 0.5);
    }
}
