//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the analytics
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::AnalyticsConfig;

/// Loads and provides access to the analytics configuration.
///
/// The `ConfigLoader` reads a single YAML file containing the attrition
/// weights and the attendance, leave, and performance thresholds. Fields
/// omitted from the file fall back to the built-in defaults, so a minimal
/// override file is valid.
///
/// # Example
///
/// ```no_run
/// use people_analytics::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/analytics.yaml").unwrap();
/// let config = loader.config();
/// println!("Attendance window: {} days", config.attendance.window_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AnalyticsConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g., "./config/analytics.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - The configuration fails validation (weights not summing to 1.0,
    ///   out-of-range thresholds)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use people_analytics::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/analytics.yaml")?;
    /// # Ok::<(), people_analytics::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from a YAML string.
    ///
    /// `source` names the origin of the string for error messages.
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let config: AnalyticsConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;

        Ok(Self { config })
    }

    /// Creates a loader holding the built-in default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: AnalyticsConfig::default(),
        }
    }

    /// Returns the underlying analytics configuration.
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }
}
