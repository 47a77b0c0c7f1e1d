//! Configuration types for Toolproof
//!
//! Step bounds and tolerances belong to the driver, not to the replay core,
//! so they live here and are handed to [`crate::replay::Replayer`] explicitly.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolproofError};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolproofConfig {
    /// Replay behavior
    #[serde(default)]
    pub replay: ReplayConfig,

    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,
}

/// Replay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Maximum number of actions processed per transcript
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Tolerance applied to numeric gold answers that carry no `tol`
    #[serde(default = "default_numeric_tolerance")]
    pub numeric_tolerance: f64,

    /// Attach per-step logs to each metrics record
    #[serde(default)]
    pub include_steps: bool,
}

fn default_max_steps() -> usize {
    8
}

fn default_numeric_tolerance() -> f64 {
    0.01
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            numeric_tolerance: default_numeric_tolerance(),
            include_steps: false,
        }
    }
}

impl ReplayConfig {
    /// Set the step bound
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the default numeric tolerance
    pub fn with_numeric_tolerance(mut self, tolerance: f64) -> Self {
        self.numeric_tolerance = tolerance;
        self
    }

    /// Enable or disable per-step logs in metrics records
    pub fn with_include_steps(mut self, include: bool) -> Self {
        self.include_steps = include;
        self
    }

    /// Validate the replay settings.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero step bound or a negative/NaN tolerance.
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(ToolproofError::Configuration(
                "replay.max_steps must be at least 1".to_string(),
            ));
        }
        if self.numeric_tolerance.is_nan() || self.numeric_tolerance < 0.0 {
            return Err(ToolproofError::Configuration(format!(
                "replay.numeric_tolerance must be a non-negative number, got {}",
                self.numeric_tolerance
            )));
        }
        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output files
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl ToolproofConfig {
    /// Load configuration from file and environment variables.
    ///
    /// Loads in this order:
    /// 1. Default configuration
    /// 2. `toolproof.toml` in the working directory
    /// 3. File named by `TOOLPROOF_CONFIG_PATH`
    /// 4. `TOOLPROOF_` environment overrides (`TOOLPROOF_REPLAY__MAX_STEPS=4`)
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is invalid.
    pub fn load() -> Result<Self> {
        use figment::{
            Figment,
            providers::{Env, Format, Serialized, Toml},
        };

        let mut figment = Figment::from(Serialized::defaults(ToolproofConfig::default()))
            .merge(Toml::file("toolproof.toml"));

        if let Ok(path) = std::env::var("TOOLPROOF_CONFIG_PATH") {
            figment = figment.merge(Toml::file(path));
        }

        let config: ToolproofConfig = figment
            .merge(Env::prefixed("TOOLPROOF_").ignore(&["CONFIG_PATH"]).split("__"))
            .extract()
            .map_err(|e| {
                ToolproofError::Configuration(format!("Failed to load configuration: {}", e))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        use figment::{
            Figment,
            providers::{Format, Serialized, Toml},
        };

        let config: ToolproofConfig = Figment::from(Serialized::defaults(ToolproofConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| {
                ToolproofError::Configuration(format!(
                    "Failed to load configuration file: {}",
                    e
                ))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        self.replay.validate()
    }
}
