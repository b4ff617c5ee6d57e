use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the surrogate library
#[derive(Debug, Error)]
pub enum SurrogateError {
    #[error("surrogate artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("failed to read surrogate artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed surrogate artifact {path}: {source}")]
    MalformedArtifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid surrogate artifact: {0}")]
    InvalidArtifact(String),

    #[error("surrogate label mismatch: expected {expected:?}, got {actual:?}")]
    LabelMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("input count mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("input '{label}' = {value} outside bounds [{lower}, {upper}]")]
    InputOutOfBounds {
        label: String,
        value: f64,
        lower: f64,
        upper: f64,
    },

    #[error("non-finite value in surrogate evaluation: {0}")]
    NonFinite(String),

    #[error("constraint '{name}' violated: residual {residual:.6}")]
    ConstraintViolation { name: String, residual: f64 },
}
