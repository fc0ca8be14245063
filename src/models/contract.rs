//! Employment contract model.
//!
//! A contract carries the two tags that index the tenure salary matrix
//! ([`ExperienceLevel`] and [`OutletType`]) plus the base salary paid once
//! the tiered months are over.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the employee had prior food-service experience when hired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Prior experience ("Berpengalaman").
    #[serde(alias = "Berpengalaman")]
    Experienced,
    /// No prior experience ("Non-Pengalaman").
    #[serde(alias = "Non-Pengalaman")]
    Inexperienced,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceLevel::Experienced => write!(f, "experienced"),
            ExperienceLevel::Inexperienced => write!(f, "inexperienced"),
        }
    }
}

/// The service format of an outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutletType {
    /// Full dine-in restaurant.
    #[serde(alias = "DineIn")]
    DineIn,
    /// Express counter.
    #[serde(alias = "Express")]
    Express,
}

impl fmt::Display for OutletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutletType::DineIn => write!(f, "dine-in"),
            OutletType::Express => write!(f, "express"),
        }
    }
}

/// The active employment contract of an employee.
///
/// Contracts are immutable once approved; a change of terms is a new
/// contract. Payroll only reads the tags and `base_salary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentContract {
    /// The employee this contract belongs to.
    pub employee_id: String,
    /// Printed contract number, e.g. "14/042/HRD-KKPTTP/III/2026".
    #[serde(default)]
    pub contract_number: Option<String>,
    /// First day covered by the contract.
    pub start_date: NaiveDate,
    /// Last day covered by the contract.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Contract type tag (e.g., "PKWTTP").
    pub contract_type: String,
    /// Experience tag; `None` falls back to the configured default.
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    /// Outlet-type tag; `None` falls back to the configured default.
    #[serde(default)]
    pub outlet_type: Option<OutletType>,
    /// Monthly base salary captured at contract creation.
    pub base_salary: Decimal,
    /// Salary schedule for the tiered months, month 1 first.
    #[serde(default)]
    pub salary_schedule: Vec<Decimal>,
    /// Daily meal allowance written on the contract.
    #[serde(default)]
    pub daily_meal_allowance: Decimal,
    /// Whether this is the employee's current contract.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// When the contract record was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}
