//! Bounded scalar decision and state variables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SurrogateError;
use crate::units::Unit;

/// A scalar model variable with an initial value, optional inclusive bounds,
/// a display unit, and a one-line description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name, also the key used by the surrogate and scaling registry
    pub name: String,

    /// Current value
    pub value: f64,

    /// Inclusive lower bound, if any
    pub lower: Option<f64>,

    /// Inclusive upper bound, if any
    pub upper: Option<f64>,

    /// Display unit
    pub unit: Unit,

    /// One-line description
    pub doc: String,
}

impl Variable {
    /// Create a variable with an initial value and no bounds
    pub fn new(name: &str, initialize: f64, unit: Unit) -> Self {
        Self {
            name: name.to_string(),
            value: initialize,
            lower: None,
            upper: None,
            unit,
            doc: String::new(),
        }
    }

    /// Attach inclusive bounds
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = Some(lower);
        self.upper = Some(upper);
        self
    }

    /// Attach an inclusive lower bound only
    pub fn with_lower_bound(mut self, lower: f64) -> Self {
        self.lower = Some(lower);
        self
    }

    /// Attach a description
    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = doc.to_string();
        self
    }

    /// Current value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Assign a new value. Bounds are enforced at the evaluation boundary,
    /// not on raw assignment, so a solver-style caller may pass transiently
    /// infeasible iterates.
    pub fn set(&mut self, value: f64) {
        self.value = value;
    }

    /// True when the current value lies inside the declared bounds
    pub fn is_within_bounds(&self) -> bool {
        let above_lower = self.lower.map_or(true, |lo| self.value >= lo);
        let below_upper = self.upper.map_or(true, |hi| self.value <= hi);
        above_lower && below_upper
    }

    /// Check bounds, returning a typed error naming the violation
    pub fn check_bounds(&self) -> Result<(), SurrogateError> {
        if self.is_within_bounds() {
            return Ok(());
        }
        Err(SurrogateError::InputOutOfBounds {
            label: self.name.clone(),
            value: self.value,
            lower: self.lower.unwrap_or(f64::NEG_INFINITY),
            upper: self.upper.unwrap_or(f64::INFINITY),
        })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} {}", self.name, self.value, self.unit)
    }
}
