use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the data loading and analysis layer.
#[derive(Debug, Error)]
pub enum DataError {
    /// Source file missing or not parseable as a well-formed table.
    #[error("data unavailable at {path}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    /// Caller asked for an indicator key that is not in the dataset schema.
    #[error("unknown indicator `{0}`")]
    UnknownIndicator(String),

    /// Caller asked for a tract id that is not in the dataset.
    #[error("unknown tract `{0}`")]
    UnknownTract(String),

    /// The requested statistic is undefined for the given inputs.
    #[error("not enough data: {0}")]
    InsufficientData(String),
}

impl DataError {
    pub fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while executing pipeline steps.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("step `{step}` failed with exit code {code:?}")]
    StepFailed { step: String, code: Option<i32> },

    #[error("step `{step}` timed out after {seconds}s")]
    StepTimedOut { step: String, seconds: u64 },
}
