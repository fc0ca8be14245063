//! Configuration loading and management for the HRIS engine.
//!
//! This module loads payroll rules, the tenure salary matrix, the churn
//! model and the contract rules from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use hris_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hris").unwrap();
//! println!("Reference day: {}", config.payroll_rules().reference_day);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ChurnCoefficients, ChurnModel, ContractRules, DashboardLimits, EngineConfig, FactorThresholds,
    OutletRates, PayrollRules, RiskThresholds, SalaryMatrix,
};
