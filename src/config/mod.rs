//!
//! JSON configuration files for the calculator
//!

pub mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::VelocityChoice;
use crate::setup::SetupParameters;
use crate::sweep::SweepConfig;
use error::ConfigError;

///
/// Everything needed for one run of the calculator. The velocity choice is required in the file,
/// the sweep falls back to `SweepConfig::default()` when it is left out.
///
/// # Fields:
/// - `setup`: The physical and sensor setup
/// - `velocity`: Which fall velocity the blur calculations use
/// - `sweep`: The axes of the blur surface
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub setup: SetupParameters,
    pub velocity: VelocityChoice,
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl CalculatorConfig {
    ///
    /// # Parameters:
    /// - `velocity`: The velocity choice to pair with the default setup
    ///
    /// # Returns:
    /// - A configuration holding the default setup and sweep
    ///
    pub fn with_defaults(velocity: VelocityChoice) -> CalculatorConfig {
        CalculatorConfig { setup: SetupParameters::default_setup(), velocity, sweep: SweepConfig::default() }
    }

    ///
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Returns:
    /// - The `CalculatorConfig`
    /// - A `ConfigError` if the JSON is malformed, a setup value is out of range or a sweep axis is
    ///   invalid
    ///
    pub fn from_json_str(json: &str) -> Result<CalculatorConfig, ConfigError> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.sweep.validate()?;
        Ok(config)
    }

    ///
    /// Reads a configuration file from disk.
    ///
    /// # Parameters:
    /// - `path`: The path of the JSON file
    ///
    pub fn load(path: &Path) -> Result<CalculatorConfig, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;

        log::debug!("loaded configuration from {}", path.display());
        CalculatorConfig::from_json_str(&json)
    }

    ///
    /// Writes this configuration to disk as pretty-printed JSON.
    ///
    /// # Parameters:
    /// - `path`: The path of the JSON file
    ///
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })
    }
}
