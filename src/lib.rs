//! pcmconv - lossless WAV ↔ AIFF PCM conversion
//!
//! pcmconv reads an uncompressed PCM container, detects whether it is WAV
//! or AIFF, and rewrites its samples into the other (or the same) container
//! without touching sample values, rate, depth or channel layout.
//!
//! # Architecture
//!
//! - `format`: Container handling (WAV and AIFF demuxing/muxing)
//! - `codec`: PCM sample codec and sample buffers
//! - `probe`: Container detection
//! - `transcode`: Chunked decode → encode loop
//! - `convert`: File-to-file entry point
//! - `util`: Sample formats and byte order

pub mod codec;
pub mod convert;
pub mod error;
pub mod format;
pub mod probe;
pub mod transcode;
pub mod util;

pub use convert::{convert, ConvertConfig, ConvertReport};
pub use error::{Error, Result, Stage};
pub use format::{ContainerKind, StreamFormat};
pub use transcode::{TranscodeReport, Transcoder, DEFAULT_CHUNK_FRAMES};

/// pcmconv version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// Configuration for the pcmconv library
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

/// Initialize the pcmconv library with the given configuration
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(level))
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| Error::Init(format!("Failed to initialize logging: {}", e)))?;
    }

    Ok(())
}
