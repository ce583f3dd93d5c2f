//! pcmconv-probe - container inspection for pcmconv
//!
//! Detects whether a file is WAV or AIFF and prints its stream parameters.
//!
//! # Usage
//!
//! ```bash
//! # Show human-readable output
//! pcmconv-probe take.wav
//!
//! # Show JSON output
//! pcmconv-probe --format json take.aiff
//!
//! # Show compact JSON output
//! pcmconv-probe --format json --compact take.aiff
//! ```

use clap::{Parser, ValueEnum};
use pcmconv_lib::format::detect_format_from_extension;
use pcmconv_lib::probe::MediaProbe;
use std::process;

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "pcmconv-probe")]
#[command(about = "Inspect WAV and AIFF files", long_about = None)]
struct Args {
    /// Audio file to probe
    #[arg(value_name = "FILE")]
    file: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Compact JSON output (only with --format json)
    #[arg(short, long)]
    compact: bool,
}

fn main() {
    let args = Args::parse();

    let probe = match MediaProbe::new(&args.file) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: Failed to open file '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let report = match probe.analyze() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: Failed to analyze file '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    if let Some(by_extension) = detect_format_from_extension(&args.file) {
        if by_extension != report.container {
            eprintln!(
                "Warning: '{}' has a .{} extension but contains {} data",
                args.file,
                by_extension.extension(),
                report.container
            );
        }
    }

    match args.format {
        OutputFormat::Text => {
            println!("{}", report);
        }
        OutputFormat::Json => {
            let json = if args.compact {
                report.to_json_compact()
            } else {
                report.to_json()
            };

            match json {
                Ok(j) => println!("{}", j),
                Err(e) => {
                    eprintln!("Error: Failed to serialize JSON: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
