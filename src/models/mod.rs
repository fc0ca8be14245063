//! Core data models for the HRIS engine.
//!
//! This module contains the domain records read and written by the
//! calculators: employees, contracts, attendance summaries, payroll
//! entries, churn predictions and cash advances.

mod attendance;
mod audit;
mod cash_advance;
mod churn;
mod contract;
mod employee;
mod payroll;
mod period;

pub use attendance::{AttendanceCounts, AttendanceSummary};
pub use audit::{AuditStep, AuditWarning, WarningSeverity};
pub use cash_advance::{AdvanceStanding, CashAdvance, CashAdvanceStatus};
pub use churn::{ChurnPrediction, RiskFactor, RiskLevel};
pub use contract::{EmploymentContract, ExperienceLevel, OutletType};
pub use employee::{Employee, Outlet, Role};
pub use payroll::{PayrollEntry, PayrollStatus};
pub use period::PayrollPeriod;
