// ⚙️ Engine Configuration
// JSON file + environment overrides

use crate::chart::{ChartOptions, DEFAULT_FORECAST_YEAR};
use crate::interpretation::{InterpretationTable, Methodology};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "NUMEROLOGY_CONFIG";
pub const ENV_DB_PATH: &str = "NUMEROLOGY_DB_PATH";
pub const ENV_SERVER_ADDR: &str = "NUMEROLOGY_SERVER_ADDR";
pub const ENV_FORECAST_YEAR: &str = "NUMEROLOGY_FORECAST_YEAR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub forecast_year: i32,
    pub reduce_master_destiny_for_ages: bool,
    pub methodology: Methodology,
    /// Required when `methodology` is `custom`
    pub interpretations_path: Option<PathBuf>,
    pub database_path: PathBuf,
    pub server_addr: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            forecast_year: DEFAULT_FORECAST_YEAR,
            reduce_master_destiny_for_ages: false,
            methodology: Methodology::Pythagorean,
            interpretations_path: None,
            database_path: PathBuf::from("numerology.db"),
            server_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// File (explicit path, else `NUMEROLOGY_CONFIG`, else defaults) with
    /// environment overrides applied on top
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from);

        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => {
                tracing::debug!(?path, "loading config file");
                EngineConfig::from_file(path)?
            }
            None => EngineConfig::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.database_path = PathBuf::from(path);
        }

        if let Some(addr) = lookup(ENV_SERVER_ADDR) {
            self.server_addr = addr;
        }

        if let Some(year) = lookup(ENV_FORECAST_YEAR) {
            self.forecast_year = year
                .trim()
                .parse()
                .with_context(|| format!("{} must be a year, got {:?}", ENV_FORECAST_YEAR, year))?;
        }

        Ok(())
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            forecast_year: self.forecast_year,
            reduce_master_destiny_for_ages: self.reduce_master_destiny_for_ages,
        }
    }

    /// The single interpretation table this deployment uses
    pub fn interpretation_table(&self) -> Result<InterpretationTable> {
        match self.methodology {
            Methodology::Pythagorean => Ok(InterpretationTable::pythagorean()),
            Methodology::Custom => {
                let path = self
                    .interpretations_path
                    .as_ref()
                    .ok_or_else(|| anyhow!("methodology 'custom' requires interpretations_path"))?;
                InterpretationTable::from_file(path)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.forecast_year, 2026);
        assert!(!config.reduce_master_destiny_for_ages);
        assert_eq!(config.methodology, Methodology::Pythagorean);
        assert_eq!(config.chart_options(), ChartOptions::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"forecast_year": 2027, "database_path": "/tmp/charts.db"}}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.forecast_year, 2027);
        assert_eq!(config.database_path, PathBuf::from("/tmp/charts.db"));
        assert_eq!(config.server_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DB_PATH, "/data/numerology.db"),
            (ENV_SERVER_ADDR, "127.0.0.1:8080"),
            (ENV_FORECAST_YEAR, " 2028 "),
        ]
        .into_iter()
        .collect();

        let mut config = EngineConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/data/numerology.db"));
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.forecast_year, 2028);
    }

    #[test]
    fn test_bad_forecast_year_override() {
        let mut config = EngineConfig::default();
        let result = config.apply_overrides(|key| {
            (key == ENV_FORECAST_YEAR).then(|| "next year".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_methodology_requires_path() {
        let config = EngineConfig {
            methodology: Methodology::Custom,
            ..EngineConfig::default()
        };
        assert!(config.interpretation_table().is_err());

        let table = EngineConfig::default().interpretation_table().unwrap();
        assert_eq!(table.methodology(), "pythagorean");
    }
}
