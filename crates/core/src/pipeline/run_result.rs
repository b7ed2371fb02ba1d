use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::transcription::domain::model_size::ModelSize;

/// Terminal failure of one transcription run.
///
/// Every variant carries the offending path or token so the exit message
/// can name it. No variant is retried; each maps to exactly one stable
/// [`ErrorKind`].
#[derive(Error, Debug)]
pub enum RunError {
    #[error("input file not usable: {} ({detail})", path.display())]
    InvalidInputPath { path: PathBuf, detail: String },

    #[error("unrecognized model size '{token}' (expected tiny, base, small, medium or large)")]
    InvalidModelSize { token: String },

    #[error("could not acquire '{size}' model: {detail}")]
    ModelUnavailable { size: ModelSize, detail: String },

    #[error("failed to decode audio from {}: {detail}", path.display())]
    AudioDecode { path: PathBuf, detail: String },

    #[error("transcription failed: {detail}")]
    Inference { detail: String },

    #[error("failed to write transcript to {}: {detail}", path.display())]
    OutputWrite { path: PathBuf, detail: String },
}

impl RunError {
    /// Stable taxonomy tag for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::InvalidInputPath { .. } => ErrorKind::InvalidInputPath,
            RunError::InvalidModelSize { .. } => ErrorKind::InvalidModelSize,
            RunError::ModelUnavailable { .. } => ErrorKind::ModelUnavailable,
            RunError::AudioDecode { .. } => ErrorKind::AudioDecodeError,
            RunError::Inference { .. } => ErrorKind::InferenceError,
            RunError::OutputWrite { .. } => ErrorKind::OutputWriteError,
        }
    }
}

/// Stable error tags reported in run results and exit messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidInputPath,
    InvalidModelSize,
    ModelUnavailable,
    AudioDecodeError,
    InferenceError,
    OutputWriteError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInputPath => "InvalidInputPath",
            ErrorKind::InvalidModelSize => "InvalidModelSize",
            ErrorKind::ModelUnavailable => "ModelUnavailable",
            ErrorKind::AudioDecodeError => "AudioDecodeError",
            ErrorKind::InferenceError => "InferenceError",
            ErrorKind::OutputWriteError => "OutputWriteError",
        };
        write!(f, "{name}")
    }
}

/// Externally observable outcome of one invocation.
///
/// A non-success result is authoritative regardless of what is on disk at
/// the output path (a failed write may leave a truncated file).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl RunResult {
    pub fn success(output_path: PathBuf) -> Self {
        Self {
            success: true,
            output_path: Some(output_path),
            error: None,
        }
    }

    pub fn failure(error: ErrorKind) -> Self {
        Self {
            success: false,
            output_path: None,
            error: Some(error),
        }
    }
}
