//! Persisted surrogate artifacts.
//!
//! An artifact is the JSON serialization of a trained surrogate: labels,
//! training bounds, one regression expression per output, and provenance
//! metadata. Loading validates the artifact up front so a malformed model is
//! rejected at build time rather than mid-evaluation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use super::{PolynomialExpression, SurrogateMetadata};
use crate::error::SurrogateError;

/// A pre-trained regression surrogate loaded from disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurrogateArtifact {
    pub metadata: SurrogateMetadata,

    /// Input labels, in evaluation order
    pub input_labels: Vec<String>,

    /// Output labels, in evaluation order
    pub output_labels: Vec<String>,

    /// Training box per input: [lower, upper]. Doubles as the min-max
    /// normalization range.
    pub input_bounds: BTreeMap<String, [f64; 2]>,

    /// Regression expression per output label
    pub outputs: BTreeMap<String, PolynomialExpression>,
}

impl SurrogateArtifact {
    /// Load and validate an artifact from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, SurrogateError> {
        if !path.exists() {
            return Err(SurrogateError::ArtifactNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path).map_err(|source| SurrogateError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact: Self =
            serde_json::from_str(&raw).map_err(|source| SurrogateError::MalformedArtifact {
                path: path.to_path_buf(),
                source,
            })?;

        artifact.validate()?;

        info!(
            model_id = %artifact.metadata.model_id,
            version = %artifact.metadata.version,
            inputs = artifact.input_labels.len(),
            outputs = artifact.output_labels.len(),
            "loaded surrogate artifact"
        );

        Ok(artifact)
    }

    /// Check internal consistency: every input has bounds, every output has
    /// an expression with matching term arity, and all numbers are finite.
    pub fn validate(&self) -> Result<(), SurrogateError> {
        if self.input_labels.is_empty() {
            return Err(SurrogateError::InvalidArtifact(
                "artifact declares no inputs".to_string(),
            ));
        }
        if self.output_labels.is_empty() {
            return Err(SurrogateError::InvalidArtifact(
                "artifact declares no outputs".to_string(),
            ));
        }

        for label in &self.input_labels {
            let bounds = self.input_bounds.get(label).ok_or_else(|| {
                SurrogateError::InvalidArtifact(format!("missing bounds for input '{label}'"))
            })?;
            let [lower, upper] = *bounds;
            if !lower.is_finite() || !upper.is_finite() {
                return Err(SurrogateError::NonFinite(format!(
                    "bounds of input '{label}'"
                )));
            }
            if lower > upper {
                return Err(SurrogateError::InvalidArtifact(format!(
                    "input '{label}' has inverted bounds [{lower}, {upper}]"
                )));
            }
        }

        for label in &self.output_labels {
            let expr = self.outputs.get(label).ok_or_else(|| {
                SurrogateError::InvalidArtifact(format!("missing expression for output '{label}'"))
            })?;
            expr.validate(self.input_labels.len(), label)?;
        }

        Ok(())
    }

    /// Evaluate the surrogate at raw input values given in input-label order.
    ///
    /// Inputs outside the training box are rejected: the regression is only
    /// trusted where it was fitted. Returns output values in output-label
    /// order.
    pub fn evaluate(&self, inputs: &[f64]) -> Result<Vec<f64>, SurrogateError> {
        if inputs.len() != self.input_labels.len() {
            return Err(SurrogateError::ArityMismatch {
                expected: self.input_labels.len(),
                actual: inputs.len(),
            });
        }

        let normalized = self.normalize(inputs)?;

        let mut outputs = Vec::with_capacity(self.output_labels.len());
        for label in &self.output_labels {
            // validate() guarantees the expression exists
            let expr = &self.outputs[label];
            let value = expr.evaluate(&normalized)?;
            if !value.is_finite() {
                return Err(SurrogateError::NonFinite(format!("output '{label}'")));
            }
            outputs.push(value);
        }

        Ok(outputs)
    }

    /// Min-max normalize raw inputs into [0, 1] by the training bounds,
    /// rejecting values outside the box
    fn normalize(&self, inputs: &[f64]) -> Result<Vec<f64>, SurrogateError> {
        self.input_labels
            .iter()
            .zip(inputs.iter())
            .map(|(label, &value)| {
                let [lower, upper] = self.input_bounds[label];
                if value < lower || value > upper {
                    return Err(SurrogateError::InputOutOfBounds {
                        label: label.clone(),
                        value,
                        lower,
                        upper,
                    });
                }
                if (upper - lower).abs() < 1e-10 {
                    return Ok(0.5); // Avoid division by zero
                }
                Ok((value - lower) / (upper - lower))
            })
            .collect()
    }
}
