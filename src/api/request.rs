//! Request types for the HRIS API.
//!
//! Bodies that map one-to-one onto a domain type
//! ([`AdvanceRequest`](crate::calculation::AdvanceRequest),
//! [`ApprovalDecision`](crate::calculation::ApprovalDecision),
//! [`ProbationApplicant`](crate::calculation::ProbationApplicant)) are
//! deserialized directly; the types here cover the rest.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::PayrollEdit;
use crate::models::{Employee, Outlet, Role};
use crate::service::{AttendanceEntry, PayrollOptions};

/// Query string of `GET /attendance/:year/:month`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetQuery {
    /// Case-insensitive filter on employee or outlet name.
    #[serde(default)]
    pub search: Option<String>,
}

/// Body of `PUT /attendance/:year/:month`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAttendanceRequest {
    /// Rows to overwrite before saving the sheet.
    pub rows: Vec<AttendanceEntry>,
}

/// Body of the payroll preview and run endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Use saved attendance for work-days.
    #[serde(default)]
    pub sync_attendance: bool,
    /// Manual edits.
    #[serde(default)]
    pub edits: Vec<PayrollEdit>,
    /// Deduct cash advance installments.
    #[serde(default)]
    pub deduct_cash_advances: bool,
}

impl From<PayrollRequest> for PayrollOptions {
    fn from(req: PayrollRequest) -> Self {
        PayrollOptions {
            sync_attendance: req.sync_attendance,
            edits: req.edits,
            deduct_cash_advances: req.deduct_cash_advances,
        }
    }
}

/// Body of `POST /cash-advances/:id/repayments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentRequest {
    /// Amount repaid.
    pub amount: Decimal,
}

/// Body of `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full name as printed on rosters.
    pub full_name: String,
    /// Role; crew when omitted.
    #[serde(default = "default_role")]
    pub role: Role,
    /// Active flag; active when omitted.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// First working day.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// Resignation date.
    #[serde(default)]
    pub resign_date: Option<NaiveDate>,
    /// Outlet identifier; the outlet name when omitted.
    #[serde(default)]
    pub outlet_id: Option<String>,
    /// Outlet display name.
    #[serde(default)]
    pub outlet_name: Option<String>,
    /// Commute distance in kilometres.
    #[serde(default)]
    pub distance_km: Option<f64>,
    /// Bank name.
    #[serde(default)]
    pub bank_name: Option<String>,
    /// Bank account number.
    #[serde(default)]
    pub bank_account_number: Option<String>,
}

fn default_role() -> Role {
    Role::Crew
}

fn default_active() -> bool {
    true
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        let outlet = req.outlet_name.map(|name| Outlet {
            id: req.outlet_id.unwrap_or_else(|| name.clone()),
            name,
        });

        Employee {
            id: req.id,
            full_name: req.full_name,
            role: req.role,
            is_active: req.is_active,
            join_date: req.join_date,
            resign_date: req.resign_date,
            outlet,
            distance_km: req.distance_km,
            bank_name: req.bank_name,
            bank_account_number: req.bank_account_number,
        }
    }
}
