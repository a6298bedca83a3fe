use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("artifact corrupt: {0}")]
    ArtifactCorrupt(String),

    #[error("unknown {field} value: {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("scaler expects {expected} features, got {got}")]
    ScalerShape { expected: usize, got: usize },

    #[error("layer {layer} expects input width {expected}, got {got}")]
    DimensionMismatch {
        layer: usize,
        expected: usize,
        got: usize,
    },

    #[error("score vector length {scores} does not match vocabulary length {labels}")]
    VocabularyMismatch { scores: usize, labels: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
