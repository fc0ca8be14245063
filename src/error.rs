//! Error types for the HRIS engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts an operation. Per-row input defects
//! (unparseable upload cells, missing join dates) are not errors: they
//! degrade to zero and are reported through counts, notes and warnings.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the HRIS engine.
///
/// # Example
///
/// ```
/// use hris_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or is internally inconsistent.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A payroll or attendance period was out of range.
    #[error("Invalid period {month}/{year}: month must be between 1 and 12")]
    InvalidPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No cash advance exists with the given identifier.
    #[error("Cash advance not found: {id}")]
    CashAdvanceNotFound {
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// A cash advance request or transition was rejected.
    #[error("Invalid cash advance: {message}")]
    InvalidCashAdvance {
        /// Why the request or transition was rejected.
        message: String,
    },

    /// The backing store rejected a read or write.
    #[error("Store operation '{operation}' failed: {message}")]
    StoreError {
        /// The store operation that failed.
        operation: String,
        /// A description of the failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
