//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::OutletType;

use super::types::{ChurnModel, ContractRules, EngineConfig, PayrollRules, SalaryMatrix};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and validates them before anything is calculated.
///
/// # Directory Structure
///
/// ```text
/// config/hris/
/// ├── payroll.yaml        # Reference day, working days, tag defaults
/// ├── salary_matrix.yaml  # Tenure salary tiers
/// ├── churn_model.yaml    # Coefficients, thresholds, dashboard sizes
/// └── contracts.yaml      # Probation contract rules and outlet catalogue
/// ```
///
/// # Example
///
/// ```no_run
/// use hris_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hris").unwrap();
/// println!("Tiered months: {}", loader.salary_matrix().tiered_months());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or
    /// the salary matrix rows are empty or of unequal length.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollRules>(&path.join("payroll.yaml"))?;
        if payroll.standard_working_days == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.join("payroll.yaml").display().to_string(),
                message: "standard_working_days must be positive".to_string(),
            });
        }

        let matrix_path = path.join("salary_matrix.yaml");
        let salary_matrix = Self::load_yaml::<SalaryMatrix>(&matrix_path)?;
        salary_matrix
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: matrix_path.display().to_string(),
                message,
            })?;

        let churn = Self::load_yaml::<ChurnModel>(&path.join("churn_model.yaml"))?;
        if churn.thresholds.medium >= churn.thresholds.high || churn.thresholds.high > 100 {
            return Err(EngineError::ConfigParseError {
                path: path.join("churn_model.yaml").display().to_string(),
                message: format!(
                    "thresholds must satisfy medium < high <= 100, got {} and {}",
                    churn.thresholds.medium, churn.thresholds.high
                ),
            });
        }

        let contracts = Self::load_yaml::<ContractRules>(&path.join("contracts.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(payroll, salary_matrix, churn, contracts),
        })
    }

    /// Wraps an already-built configuration, e.g. the built-in defaults.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
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

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the payroll rules.
    pub fn payroll_rules(&self) -> &PayrollRules {
        self.config.payroll()
    }

    /// Returns the tenure salary matrix.
    pub fn salary_matrix(&self) -> &SalaryMatrix {
        self.config.salary_matrix()
    }

    /// Returns the churn model.
    pub fn churn_model(&self) -> &ChurnModel {
        self.config.churn()
    }

    /// Returns the contract rules.
    pub fn contract_rules(&self) -> &ContractRules {
        self.config.contracts()
    }

    /// Looks up the outlet type of a named outlet in the catalogue.
    pub fn outlet_type_for(&self, outlet_name: &str) -> OutletType {
        self.config.contracts().outlet_type_for(outlet_name)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(EngineConfig::default())
    }
}
