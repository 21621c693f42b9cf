//! Configuration loading functionality.
//!
//! This module provides the [`TaxConfigLoader`] type for loading fiscal
//! year tax configurations from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

use super::types::YearConfig;

/// Loads and provides access to fiscal year tax configurations.
///
/// The `TaxConfigLoader` reads every YAML file in a directory, validates
/// each one and indexes them by fiscal year.
///
/// # Directory Structure
///
/// ```text
/// config/tax/
/// ├── 2025.yaml
/// └── 2026.yaml
/// ```
///
/// File names are informative only; the `fiscal_year` field inside each
/// file is what the configuration is indexed by.
///
/// # Example
///
/// ```no_run
/// use shift_earnings::config::TaxConfigLoader;
///
/// let loader = TaxConfigLoader::load("./config/tax").unwrap();
/// let config = loader.year(2026).unwrap();
/// println!("IAS for 2026: {}", config.ias_value);
/// ```
#[derive(Debug, Clone)]
pub struct TaxConfigLoader {
    years: BTreeMap<i32, YearConfig>,
}

impl TaxConfigLoader {
    /// Loads every fiscal year configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `TaxConfigLoader` on success, or an error if:
    /// - The directory is missing or holds no YAML files
    /// - Any file contains invalid YAML or misses a required field
    /// - Any configuration fails [`YearConfig::validate`]
    /// - Two files declare the same fiscal year
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                files.push(path);
            }
        }
        files.sort();

        let mut years = BTreeMap::new();
        for file in &files {
            let config = Self::load_yaml::<YearConfig>(file)?;
            if let Err(error) = config.validate() {
                warn!(path = %file.display(), error = %error, "Rejected tax configuration");
                return Err(error);
            }

            let year = config.fiscal_year;
            if years.insert(year, config).is_some() {
                return Err(EngineError::DuplicateFiscalYear { year });
            }
        }

        if years.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax configuration files found)", dir_str),
            });
        }

        debug!(
            path = %dir_str,
            years = ?years.keys().collect::<Vec<_>>(),
            "Loaded tax configuration"
        );

        Ok(Self { years })
    }

    /// Builds a loader from configurations constructed in code.
    ///
    /// Each configuration is validated as if it had been loaded from disk.
    pub fn from_configs(configs: impl IntoIterator<Item = YearConfig>) -> EngineResult<Self> {
        let mut years = BTreeMap::new();
        for config in configs {
            config.validate()?;
            let year = config.fiscal_year;
            if years.insert(year, config).is_some() {
                return Err(EngineError::DuplicateFiscalYear { year });
            }
        }
        Ok(Self { years })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets the configuration for exactly this fiscal year.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shift_earnings::config::TaxConfigLoader;
    ///
    /// let loader = TaxConfigLoader::load("./config/tax")?;
    /// assert!(loader.year(1999).is_err());
    /// # Ok::<(), shift_earnings::error::EngineError>(())
    /// ```
    pub fn year(&self, fiscal_year: i32) -> EngineResult<&YearConfig> {
        self.years
            .get(&fiscal_year)
            .ok_or(EngineError::TaxYearNotConfigured { year: fiscal_year })
    }

    /// Gets the most recent configuration effective for a fiscal year.
    ///
    /// Years after the newest table reuse that table. Years before the
    /// oldest table are an error.
    pub fn for_fiscal_year(&self, fiscal_year: i32) -> EngineResult<&YearConfig> {
        self.years
            .range(..=fiscal_year)
            .next_back()
            .map(|(_, config)| config)
            .ok_or(EngineError::TaxYearNotConfigured { year: fiscal_year })
    }

    /// The configured fiscal years, in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }
}
