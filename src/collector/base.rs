//! Shared base for solar energy blocks.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::scaling::ScalingRegistry;
use crate::units::Unit;
use crate::variable::Variable;

/// Collector technology tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Technology {
    FlatPlate,
}

/// Base block every solar collector builds on: the per-hour energy variables
/// shared across technologies, the technology tag, and the scaling registry
/// consulted by `calculate_scaling_factors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarEnergyBase {
    /// Which collector technology this block models
    pub technology: Technology,

    /// Heat delivered by the collector field (kW)
    pub heat: Variable,

    /// Electricity consumed by pumps and parasitics (kW)
    pub electricity: Variable,

    /// Solver scaling hints for this block's variables
    pub scaling: ScalingRegistry,
}

impl SolarEnergyBase {
    pub fn new(technology: Technology) -> Self {
        Self {
            technology,
            heat: Variable::new("heat", 0.0, Unit::Kilowatt)
                .with_lower_bound(0.0)
                .with_doc("Heat delivered by the collector field"),
            electricity: Variable::new("electricity", 0.0, Unit::Kilowatt)
                .with_lower_bound(0.0)
                .with_doc("Electricity consumed by pumps and parasitics"),
            scaling: ScalingRegistry::new(),
        }
    }
}
