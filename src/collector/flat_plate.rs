//! Flat-plate collector block.
//!
//! Declarative glue around a pre-trained surrogate: three bounded decision
//! variables feed the regression, two annual outputs come back, and a pair of
//! equality constraints converts the annual totals to the per-hour `heat` and
//! `electricity` variables of the base block.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::base::{SolarEnergyBase, Technology};
use crate::error::SurrogateError;
use crate::surrogate::{SurrogateArtifact, TrainingDataset};
use crate::units::{rate_from_annual, Unit, HOURS_PER_YEAR};
use crate::variable::Variable;

/// Surrogate input labels, in evaluation order
pub const INPUT_LABELS: [&str; 3] = ["heat_load", "hours_storage", "temperature_hot"];

/// Surrogate output labels, in evaluation order
pub const OUTPUT_LABELS: [&str; 2] = ["heat_annual", "electricity_annual"];

/// Name of the binary training dataset shipped beside the artifact
const DATASET_FILE_NAME: &str = "flat_plate_data.bin";

/// Relative tolerance for the conversion constraints
const CONSTRAINT_TOLERANCE: f64 = 1e-6;

/// Flat-plate solar-thermal collector driven by a regression surrogate
#[derive(Debug, Clone)]
pub struct FlatPlateCollector {
    /// Shared solar-energy base (per-hour variables, scaling registry)
    pub base: SolarEnergyBase,

    /// Rated plant heat capacity (MWt)
    pub heat_load: Variable,

    /// Rated plant hours of storage
    pub hours_storage: Variable,

    /// Hot outlet temperature (C)
    pub temperature_hot: Variable,

    /// Annual heat generated by the flat plate (kWh)
    pub heat_annual: Variable,

    /// Annual electricity consumed by the flat plate (kWh)
    pub electricity_annual: Variable,

    /// Provenance of the dataset the surrogate was trained on
    pub dataset: TrainingDataset,

    surrogate: SurrogateArtifact,
}

/// All block quantities after an evaluation, as one serializable record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergySnapshot {
    pub heat_load_mw: f64,
    pub hours_storage_h: f64,
    pub temperature_hot_c: f64,
    pub heat_annual_kwh: f64,
    pub electricity_annual_kwh: f64,
    pub heat_kw: f64,
    pub electricity_kw: f64,
}

impl FlatPlateCollector {
    /// Build the block from an artifact on disk.
    ///
    /// Build steps: construct variables, load the surrogate, bind its inputs
    /// and outputs by label, record the training-dataset sidecar. The two
    /// conversion constraints are part of the block itself and are checked by
    /// [`verify_constraints`](Self::verify_constraints).
    pub fn build(artifact_path: &Path) -> Result<Self, SurrogateError> {
        let surrogate = SurrogateArtifact::load_from_file(artifact_path)?;

        let dataset = TrainingDataset {
            path: artifact_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(DATASET_FILE_NAME),
            n_samples: 100,
            training_fraction: 0.8,
        };

        Self::from_artifact(surrogate, dataset)
    }

    /// Build the block from an already-loaded artifact
    pub fn from_artifact(
        surrogate: SurrogateArtifact,
        dataset: TrainingDataset,
    ) -> Result<Self, SurrogateError> {
        Self::check_labels(&surrogate)?;

        let block = Self {
            base: SolarEnergyBase::new(Technology::FlatPlate),
            heat_load: Variable::new("heat_load", 1000.0, Unit::Megawatt)
                .with_bounds(100.0, 1000.0)
                .with_doc("Rated plant heat capacity in MWt"),
            hours_storage: Variable::new("hours_storage", 20.0, Unit::Hour)
                .with_bounds(0.0, 26.0)
                .with_doc("Rated plant hours of storage"),
            temperature_hot: Variable::new("temperature_hot", 70.0, Unit::Celsius)
                .with_bounds(50.0, 100.0)
                .with_doc("Hot outlet temperature"),
            heat_annual: Variable::new("heat_annual", 1000.0, Unit::KilowattHour)
                .with_doc("Annual heat generated by flat plate"),
            electricity_annual: Variable::new("electricity_annual", 20.0, Unit::KilowattHour)
                .with_doc("Annual electricity consumed by flat plate"),
            dataset,
            surrogate,
        };

        info!(
            technology = %block.base.technology,
            model_id = %block.surrogate.metadata.model_id,
            "built flat-plate collector block"
        );

        Ok(block)
    }

    /// The surrogate backing this block
    pub fn surrogate(&self) -> &SurrogateArtifact {
        &self.surrogate
    }

    /// Set the three decision variables, enforcing their declared bounds
    pub fn set_operating_point(
        &mut self,
        heat_load_mw: f64,
        hours_storage_h: f64,
        temperature_hot_c: f64,
    ) -> Result<(), SurrogateError> {
        self.heat_load.set(heat_load_mw);
        self.hours_storage.set(hours_storage_h);
        self.temperature_hot.set(temperature_hot_c);

        self.heat_load.check_bounds()?;
        self.hours_storage.check_bounds()?;
        self.temperature_hot.check_bounds()?;
        Ok(())
    }

    /// Run the surrogate at the current operating point.
    ///
    /// Assigns the annual output variables, propagates the per-hour `heat`
    /// and `electricity` through the conversion constraints, and verifies
    /// both constraints before returning the snapshot.
    pub fn evaluate(&mut self) -> Result<EnergySnapshot, SurrogateError> {
        self.heat_load.check_bounds()?;
        self.hours_storage.check_bounds()?;
        self.temperature_hot.check_bounds()?;

        let inputs = [
            self.heat_load.value(),
            self.hours_storage.value(),
            self.temperature_hot.value(),
        ];
        let outputs = self.surrogate.evaluate(&inputs)?;

        self.heat_annual.set(outputs[0]);
        self.electricity_annual.set(outputs[1]);

        self.base.heat.set(rate_from_annual(self.heat_annual.value()));
        self.base
            .electricity
            .set(rate_from_annual(self.electricity_annual.value()));

        self.verify_constraints()?;

        debug!(
            heat_load_mw = self.heat_load.value(),
            hours_storage_h = self.hours_storage.value(),
            temperature_hot_c = self.temperature_hot.value(),
            heat_annual_kwh = self.heat_annual.value(),
            electricity_annual_kwh = self.electricity_annual.value(),
            "evaluated flat-plate surrogate"
        );

        Ok(self.snapshot())
    }

    /// Residual of `heat_annual == heat * hours_per_year`
    pub fn heat_constraint_residual(&self) -> f64 {
        self.heat_annual.value() - self.base.heat.value() * HOURS_PER_YEAR
    }

    /// Residual of `electricity_annual == electricity * hours_per_year`
    pub fn electricity_constraint_residual(&self) -> f64 {
        self.electricity_annual.value() - self.base.electricity.value() * HOURS_PER_YEAR
    }

    /// Verify both conversion constraints hold to within tolerance
    pub fn verify_constraints(&self) -> Result<(), SurrogateError> {
        let checks = [
            (
                "heat_constraint",
                self.heat_constraint_residual(),
                self.heat_annual.value(),
            ),
            (
                "electricity_constraint",
                self.electricity_constraint_residual(),
                self.electricity_annual.value(),
            ),
        ];

        for (name, residual, annual) in checks {
            let tolerance = CONSTRAINT_TOLERANCE * annual.abs().max(1.0);
            if residual.abs() > tolerance {
                return Err(SurrogateError::ConstraintViolation {
                    name: name.to_string(),
                    residual,
                });
            }
        }
        Ok(())
    }

    /// Set default scaling factors for any variable that has none.
    ///
    /// Factors already present are left untouched, so the call is idempotent.
    /// The annual variables reach 1e9 kWh at full capacity, hence the small
    /// defaults.
    pub fn calculate_scaling_factors(&mut self) {
        self.base.scaling.apply_default("hours_storage", 1.0, false);
        self.base.scaling.apply_default("heat_load", 1e-2, true);
        self.base.scaling.apply_default("temperature_hot", 1e-1, true);
        self.base.scaling.apply_default("heat_annual", 1e-4, true);
        self.base.scaling.apply_default("heat", 1e-4, true);
        self.base.scaling.apply_default("electricity_annual", 1e-3, true);
        self.base.scaling.apply_default("electricity", 1e-3, true);
    }

    /// Initialization hook. The flat plate needs no pre-solve initialization;
    /// kept for lifecycle parity with sibling collector blocks.
    pub fn initialize(&mut self) {}

    /// Current block quantities as one record
    pub fn snapshot(&self) -> EnergySnapshot {
        EnergySnapshot {
            heat_load_mw: self.heat_load.value(),
            hours_storage_h: self.hours_storage.value(),
            temperature_hot_c: self.temperature_hot.value(),
            heat_annual_kwh: self.heat_annual.value(),
            electricity_annual_kwh: self.electricity_annual.value(),
            heat_kw: self.base.heat.value(),
            electricity_kw: self.base.electricity.value(),
        }
    }

    fn check_labels(surrogate: &SurrogateArtifact) -> Result<(), SurrogateError> {
        if surrogate.input_labels != INPUT_LABELS {
            return Err(SurrogateError::LabelMismatch {
                expected: INPUT_LABELS.iter().map(|s| s.to_string()).collect(),
                actual: surrogate.input_labels.clone(),
            });
        }
        if surrogate.output_labels != OUTPUT_LABELS {
            return Err(SurrogateError::LabelMismatch {
                expected: OUTPUT_LABELS.iter().map(|s| s.to_string()).collect(),
                actual: surrogate.output_labels.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surrogate::{
        PolynomialExpression, PolynomialTerm, SurrogateMetadata, ValidationMetrics,
    };
    use rstest::rstest;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn term(coefficient: f64, exponents: [u32; 3]) -> PolynomialTerm {
        PolynomialTerm {
            coefficient,
            exponents: exponents.to_vec(),
        }
    }

    /// A small artifact with flat-plate-sized magnitudes
    fn test_artifact() -> SurrogateArtifact {
        let mut input_bounds = BTreeMap::new();
        input_bounds.insert("heat_load".to_string(), [100.0, 1000.0]);
        input_bounds.insert("hours_storage".to_string(), [0.0, 26.0]);
        input_bounds.insert("temperature_hot".to_string(), [50.0, 100.0]);

        let mut outputs = BTreeMap::new();
        outputs.insert(
            "heat_annual".to_string(),
            PolynomialExpression {
                intercept: 1.38e8,
                terms: vec![
                    term(1.242e9, [1, 0, 0]),
                    term(5.6e7, [0, 1, 0]),
                    term(-4.5e7, [0, 0, 1]),
                ],
            },
        );
        outputs.insert(
            "electricity_annual".to_string(),
            PolynomialExpression {
                intercept: 2.1e6,
                terms: vec![term(1.85e7, [1, 0, 0]), term(9.0e5, [0, 1, 0])],
            },
        );

        let mut validation_metrics = BTreeMap::new();
        validation_metrics.insert(
            "heat_annual".to_string(),
            ValidationMetrics::new(2.1e6, 3.4e6, 0.7, 0.998),
        );
        validation_metrics.insert(
            "electricity_annual".to_string(),
            ValidationMetrics::new(4.0e4, 6.1e4, 1.1, 0.996),
        );

        SurrogateArtifact {
            metadata: SurrogateMetadata {
                model_id: "flat_plate_surrogate".to_string(),
                version: "1.0.0".to_string(),
                trained_at: chrono::Utc::now(),
                training_samples: 100,
                validation_metrics,
            },
            input_labels: INPUT_LABELS.iter().map(|s| s.to_string()).collect(),
            output_labels: OUTPUT_LABELS.iter().map(|s| s.to_string()).collect(),
            input_bounds,
            outputs,
        }
    }

    fn test_dataset() -> TrainingDataset {
        TrainingDataset {
            path: PathBuf::from("data/flat_plate_data.bin"),
            n_samples: 100,
            training_fraction: 0.8,
        }
    }

    fn test_block() -> FlatPlateCollector {
        FlatPlateCollector::from_artifact(test_artifact(), test_dataset()).unwrap()
    }

    #[test]
    fn test_build_declares_expected_variables() {
        let block = test_block();

        assert_eq!(block.heat_load.value(), 1000.0);
        assert_eq!(block.heat_load.lower, Some(100.0));
        assert_eq!(block.heat_load.upper, Some(1000.0));

        assert_eq!(block.hours_storage.value(), 20.0);
        assert_eq!(block.hours_storage.upper, Some(26.0));

        assert_eq!(block.temperature_hot.value(), 70.0);
        assert_eq!(block.temperature_hot.lower, Some(50.0));

        // Initial values must lie inside their declared bounds
        assert!(block.heat_load.is_within_bounds());
        assert!(block.hours_storage.is_within_bounds());
        assert!(block.temperature_hot.is_within_bounds());

        assert_eq!(block.base.technology, Technology::FlatPlate);
    }

    #[test]
    fn test_build_records_training_dataset() {
        let block = test_block();
        assert_eq!(block.dataset.n_samples, 100);
        assert!((block.dataset.training_fraction - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_label_mismatch_rejected_at_build() {
        let mut artifact = test_artifact();
        artifact.input_labels[0] = "thermal_load".to_string();

        let err = FlatPlateCollector::from_artifact(artifact, test_dataset()).unwrap_err();
        assert!(matches!(err, SurrogateError::LabelMismatch { .. }));
    }

    #[test]
    fn test_evaluate_satisfies_conversion_constraints() {
        let mut block = test_block();
        let snapshot = block.evaluate().unwrap();

        assert!(snapshot.heat_annual_kwh > 0.0);
        assert!(snapshot.electricity_annual_kwh > 0.0);

        // heat == heat_annual / 8766 up to floating-point error
        let expected_heat_kw = snapshot.heat_annual_kwh / HOURS_PER_YEAR;
        assert!((snapshot.heat_kw - expected_heat_kw).abs() < 1e-6);

        assert!(block.verify_constraints().is_ok());
    }

    #[test]
    fn test_evaluate_at_bound_values() {
        let mut block = test_block();
        block.set_operating_point(100.0, 0.0, 50.0).unwrap();
        assert!(block.evaluate().is_ok());

        block.set_operating_point(1000.0, 26.0, 100.0).unwrap();
        assert!(block.evaluate().is_ok());
    }

    #[test]
    fn test_out_of_bounds_operating_point_rejected() {
        let mut block = test_block();
        let err = block.set_operating_point(1500.0, 20.0, 70.0).unwrap_err();
        assert!(matches!(
            err,
            SurrogateError::InputOutOfBounds { ref label, .. } if label.as_str() == "heat_load"
        ));
    }

    #[test]
    fn test_evaluate_rejects_stale_out_of_bounds_value() {
        let mut block = test_block();
        block.hours_storage.set(30.0);
        assert!(block.evaluate().is_err());
    }

    #[test]
    fn test_constraint_residuals_nonzero_before_evaluate() {
        let block = test_block();
        // Initial guesses do not satisfy the conversion constraints
        assert!(block.heat_constraint_residual().abs() > 0.0);
        assert!(block.verify_constraints().is_err());
    }

    #[rstest]
    #[case("hours_storage", 1.0)]
    #[case("heat_load", 1e-2)]
    #[case("temperature_hot", 1e-1)]
    #[case("heat_annual", 1e-4)]
    #[case("heat", 1e-4)]
    #[case("electricity_annual", 1e-3)]
    #[case("electricity", 1e-3)]
    fn test_scaling_defaults(#[case] name: &str, #[case] expected: f64) {
        let mut block = test_block();
        block.calculate_scaling_factors();
        assert_eq!(block.base.scaling.get(name), Some(expected));
    }

    #[test]
    fn test_scaling_defaults_applied_once() {
        let mut block = test_block();
        block.base.scaling.set("heat_load", 5e-3);

        block.calculate_scaling_factors();
        block.calculate_scaling_factors();

        // Pre-set factor untouched, defaults filled in exactly once
        assert_eq!(block.base.scaling.get("heat_load"), Some(5e-3));
        assert_eq!(block.base.scaling.get("heat_annual"), Some(1e-4));
        assert_eq!(block.base.scaling.len(), 7);
    }

    #[test]
    fn test_initialize_is_a_no_op() {
        let mut block = test_block();
        let before = block.snapshot();
        block.initialize();
        let after = block.snapshot();
        assert_eq!(before.heat_load_mw, after.heat_load_mw);
        assert_eq!(before.heat_annual_kwh, after.heat_annual_kwh);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut block = test_block();
        let snapshot = block.evaluate().unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("heat_annual_kwh"));
    }
}
