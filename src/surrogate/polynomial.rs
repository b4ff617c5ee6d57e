//! Polynomial regression expressions.
//!
//! Each surrogate output is an intercept plus a sum of terms, where a term is
//! a coefficient times a product of normalized inputs raised to per-input
//! exponents. Inputs are min-max normalized into [0, 1] before evaluation so
//! the coefficients stay well conditioned regardless of the raw input ranges.

use serde::{Deserialize, Serialize};

use crate::error::SurrogateError;

/// A single polynomial term: coefficient * prod(x_i ^ exponents[i])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialTerm {
    pub coefficient: f64,
    /// One exponent per input, in input-label order
    pub exponents: Vec<u32>,
}

/// Polynomial regression expression for one surrogate output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialExpression {
    pub intercept: f64,
    pub terms: Vec<PolynomialTerm>,
}

impl PolynomialExpression {
    /// Evaluate against normalized inputs.
    ///
    /// The caller guarantees `x` is in input-label order; arity is checked
    /// against every term.
    pub fn evaluate(&self, x: &[f64]) -> Result<f64, SurrogateError> {
        let mut value = self.intercept;
        for term in &self.terms {
            if term.exponents.len() != x.len() {
                return Err(SurrogateError::ArityMismatch {
                    expected: term.exponents.len(),
                    actual: x.len(),
                });
            }
            let monomial: f64 = term
                .exponents
                .iter()
                .zip(x.iter())
                .map(|(&exp, &xi)| xi.powi(exp as i32))
                .product();
            value += term.coefficient * monomial;
        }
        Ok(value)
    }

    /// Validate coefficients and term arity against the declared input count
    pub fn validate(&self, n_inputs: usize, label: &str) -> Result<(), SurrogateError> {
        if !self.intercept.is_finite() {
            return Err(SurrogateError::NonFinite(format!(
                "intercept of output '{label}'"
            )));
        }
        for (i, term) in self.terms.iter().enumerate() {
            if !term.coefficient.is_finite() {
                return Err(SurrogateError::NonFinite(format!(
                    "coefficient of term {i} in output '{label}'"
                )));
            }
            if term.exponents.len() != n_inputs {
                return Err(SurrogateError::InvalidArtifact(format!(
                    "term {i} of output '{label}' has {} exponents, expected {n_inputs}",
                    term.exponents.len()
                )));
            }
        }
        Ok(())
    }
}
