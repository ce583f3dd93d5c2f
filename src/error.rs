//! Error types for pcmconv

use std::fmt;
use thiserror::Error;

/// Result type alias for pcmconv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an error surfaced from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening the input file
    Open,
    /// Classifying the input container
    Sniff,
    /// Reading PCM data from the source
    Decode,
    /// Writing PCM data to the destination
    Encode,
    /// Patching headers and flushing the destination
    Finalize,
    /// Creating the output file
    Create,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Open => "opening",
            Stage::Sniff => "sniffing",
            Stage::Decode => "decoding",
            Stage::Encode => "encoding",
            Stage::Finalize => "finalizing",
            Stage::Create => "creating",
        };
        f.write_str(name)
    }
}

/// Main error type for pcmconv
#[derive(Error, Debug)]
pub enum Error {
    /// Neither the WAV nor the AIFF signature matched
    #[error("Unrecognized container: input is neither WAV nor AIFF")]
    UnrecognizedContainer,

    /// Header is structurally invalid or the PCM data region is missing
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// Bit depth outside {8, 16, 24, 32}
    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// Header declares more sample-frames than the body holds
    #[error("Truncated container: header declares {declared} frames, only {available} available")]
    TruncatedContainer { declared: u64, available: u64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed container carrying a non-PCM encoding
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),

    /// Error annotated with the stage it came from
    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a malformed container error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedContainer(msg.into())
    }

    /// Create an unsupported error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        Error::InvalidState(msg.into())
    }

    /// Wrap this error with the stage it surfaced from.
    ///
    /// An error that already carries a stage is returned unchanged so the
    /// innermost stage wins.
    pub fn at(self, stage: Stage) -> Self {
        match self {
            Error::Stage { .. } => self,
            other => Error::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage this error was annotated with, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error with any stage annotation stripped
    pub fn root(&self) -> &Error {
        match self {
            Error::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Extension for annotating results with a pipeline stage
pub trait StageExt<T> {
    /// Tag the error side of this result with `stage`
    fn stage(self, stage: Stage) -> Result<T>;
}

impl<T> StageExt<T> for Result<T> {
    fn stage(self, stage: Stage) -> Result<T> {
        self.map_err(|e| e.at(stage))
    }
}
