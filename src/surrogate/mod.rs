//! Pre-trained regression surrogates.
//!
//! A surrogate approximates a more expensive physical simulation. It is
//! persisted as a JSON artifact on disk, loaded once per block instantiation,
//! and immutable thereafter:
//! - Artifact schema and loading (`artifact`)
//! - Polynomial regression evaluation (`polynomial`)
//! - Training provenance and validation metrics (this module)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub mod artifact;
pub mod polynomial;

pub use artifact::SurrogateArtifact;
pub use polynomial::{PolynomialExpression, PolynomialTerm};

/// Surrogate provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurrogateMetadata {
    pub model_id: String,
    pub version: String,
    pub trained_at: DateTime<Utc>,
    pub training_samples: usize,
    /// Hold-out validation metrics, keyed by output label
    pub validation_metrics: BTreeMap<String, ValidationMetrics>,
}

/// Validation Metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub mae: f64,  // Mean Absolute Error
    pub rmse: f64, // Root Mean Square Error
    pub mape: f64, // Mean Absolute Percentage Error
    pub r2: f64,   // R-squared
}

impl ValidationMetrics {
    pub fn new(mae: f64, rmse: f64, mape: f64, r2: f64) -> Self {
        Self {
            mae,
            rmse,
            mape,
            r2,
        }
    }

    /// Check if metrics meet quality thresholds
    pub fn meets_quality_threshold(&self, max_mape: f64, min_r2: f64) -> bool {
        self.mape <= max_mape && self.r2 >= min_r2
    }
}

/// Description of the dataset a surrogate was trained on.
///
/// The dataset itself is a sidecar file beside the artifact and is never
/// loaded here; training happens upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingDataset {
    /// Path to the binary dataset file
    pub path: PathBuf,

    /// Number of samples drawn from the simulation
    pub n_samples: usize,

    /// Fraction of samples used for training (the rest validate)
    pub training_fraction: f64,
}
