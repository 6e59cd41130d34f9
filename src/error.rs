// src/error.rs
//
// Error taxonomy for the analysis pipeline. Configuration lookups fail
// hard; load/analysis failures are routed through the harness policy.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Symbolic audio key with no entry in the configured mapping.
    #[error("unknown audio key: '{0}'")]
    UnknownKey(String),

    /// Analysis-type name with no configured output directory.
    #[error("unknown analysis type: '{0}'")]
    UnknownAnalysisType(String),

    /// Input audio path does not exist.
    #[error("audio file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file exists but could not be decoded into samples.
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// A feature extractor could not produce output for this input.
    #[error("analysis failed: {0}")]
    Analysis(String),

    /// Chart construction or encoding failed.
    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn decode(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
