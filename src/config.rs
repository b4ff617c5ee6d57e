use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub surrogate: SurrogateConfig,
    pub operating_point: OperatingPointConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurrogateConfig {
    /// Path to the pre-trained artifact, relative to the crate root
    pub artifact_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperatingPointConfig {
    pub heat_load_mw: f64,
    pub hours_storage_h: f64,
    pub temperature_hot_c: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("FPC__").split("__"));
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_toml() {
        let figment = Figment::new().merge(Toml::string(
            r#"
            [surrogate]
            artifact_path = "data/flat_plate_surrogate.json"

            [operating_point]
            heat_load_mw = 1000.0
            hours_storage_h = 20.0
            temperature_hot_c = 70.0
            "#,
        ));

        let cfg: Config = figment.extract().unwrap();
        assert_eq!(
            cfg.surrogate.artifact_path,
            PathBuf::from("data/flat_plate_surrogate.json")
        );
        assert_eq!(cfg.operating_point.heat_load_mw, 1000.0);
        assert_eq!(cfg.operating_point.temperature_hot_c, 70.0);
    }
}
