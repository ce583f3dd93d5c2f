//! pcmconv CLI - WAV ↔ AIFF conversion
//!
//! A command-line tool for rewriting PCM audio between containers

use clap::Parser;
use pcmconv_lib::{convert, init, Config, ContainerKind, ConvertConfig, DEFAULT_CHUNK_FRAMES};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "pcmconv")]
#[command(about = "Convert PCM audio between WAV and AIFF", long_about = None)]
#[command(version)]
struct Cli {
    /// Input file path
    #[arg(short, long)]
    input: PathBuf,

    /// Target container (wav, wave, aiff, aif)
    #[arg(short, long, default_value = "wav")]
    format: ContainerKind,

    /// Output path stem; the target extension is appended
    #[arg(short, long, default_value = "out")]
    output: String,

    /// Sample-frames moved per read
    #[arg(long, default_value_t = DEFAULT_CHUNK_FRAMES, value_parser = parse_chunk_frames)]
    chunk_frames: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn parse_chunk_frames(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("chunk size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize the library
    let config = Config {
        verbose: cli.verbose,
        debug: cli.debug,
    };

    init(config)?;

    info!("pcmconv v{}", pcmconv_lib::VERSION);

    let config = ConvertConfig::new(cli.input, cli.format)
        .with_output_stem(cli.output)
        .with_chunk_frames(cli.chunk_frames);

    info!(
        "Converting {} -> {}",
        config.input_path.display(),
        config.output_path().display()
    );

    let report = convert(config)?;
    println!("{} written to disk", report.output_path.display());

    Ok(())
}
