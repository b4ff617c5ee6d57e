//! Solver scaling-factor registry.
//!
//! Scaling factors are numerical-conditioning hints for the enclosing
//! nonlinear solver. They are never required for model correctness: a block
//! sets a default exactly once when a factor is absent and leaves any
//! caller-provided factor untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Registry mapping variable names to scaling factors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalingRegistry {
    factors: BTreeMap<String, f64>,
}

impl ScalingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scaling factor for a variable, if one has been set
    pub fn get(&self, name: &str) -> Option<f64> {
        self.factors.get(name).copied()
    }

    /// Scaling factor for a variable, falling back to a default without
    /// recording it
    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    /// Set (or overwrite) the scaling factor for a variable
    pub fn set(&mut self, name: &str, factor: f64) {
        self.factors.insert(name.to_string(), factor);
    }

    /// Set a default scaling factor only when none is present.
    ///
    /// Returns `true` when the default was applied. With `warn_on_default`,
    /// a missing factor is reported so the caller can supply a deliberate
    /// one instead of relying on the heuristic.
    pub fn apply_default(&mut self, name: &str, default: f64, warn_on_default: bool) -> bool {
        if self.factors.contains_key(name) {
            return false;
        }
        if warn_on_default {
            warn!(
                variable = name,
                scaling_factor = default,
                "no scaling factor set, applying default"
            );
        }
        self.factors.insert(name.to_string(), default);
        true
    }

    /// Number of registered factors
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}
