//! Surrogate-driven flat-plate solar-thermal collector block.
//!
//! The crate models one flowsheet component: a flat-plate collector whose
//! annual heat and electricity are predicted by a pre-trained regression
//! surrogate loaded from disk. The block declares bounded decision variables
//! (heat load, hours of storage, hot outlet temperature), binds the surrogate
//! to them, wires two equality constraints converting annual totals to
//! per-hour energy rates, and sets default solver scaling factors.
//!
//! # Architecture
//! - `collector`: the block itself and the shared solar-energy base
//! - `surrogate`: artifact loading and polynomial regression evaluation
//! - `variable`, `units`, `scaling`: algebraic-variable plumbing
//! - `config`, `telemetry`, `error`: runtime configuration, logging, errors

pub mod collector;
pub mod config;
pub mod error;
pub mod scaling;
pub mod surrogate;
pub mod telemetry;
pub mod units;
pub mod variable;

pub use collector::{EnergySnapshot, FlatPlateCollector, SolarEnergyBase, Technology};
pub use error::SurrogateError;
pub use scaling::ScalingRegistry;
pub use surrogate::SurrogateArtifact;
pub use variable::Variable;
