//! Sample buffers and the PCM codec

pub mod frame;
pub mod pcm;

pub use frame::SampleBuffer;
pub use pcm::{PcmConfig, PcmDecoder, PcmEncoder};
