use std::path::PathBuf;

use thiserror::Error;

/// Failures of the front ends: preset files, effect and decay names, and
/// frame output.
/// The engine itself never fails.
#[derive(Debug, Error)]
pub enum SparkError {
    #[error("failed to read preset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    #[error("unknown frame decay '{0}' (expected persist, clear, halve or linear:<n>)")]
    UnknownDecay(String),

    #[error("failed to write frame: {0}")]
    Write(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SparkError>;
