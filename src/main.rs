use anyhow::Result;
use solar_thermal_surrogate::{collector::FlatPlateCollector, config::Config, telemetry};
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let cfg = Config::load()?;

    let mut collector = FlatPlateCollector::build(&cfg.surrogate.artifact_path)?;

    collector.set_operating_point(
        cfg.operating_point.heat_load_mw,
        cfg.operating_point.hours_storage_h,
        cfg.operating_point.temperature_hot_c,
    )?;

    collector.calculate_scaling_factors();
    collector.initialize();

    let snapshot = collector.evaluate()?;

    info!(
        heat_annual_kwh = snapshot.heat_annual_kwh,
        electricity_annual_kwh = snapshot.electricity_annual_kwh,
        heat_kw = snapshot.heat_kw,
        electricity_kw = snapshot.electricity_kw,
        "flat-plate collector evaluated"
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
