//! Persisted payroll entry model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval status of a persisted payroll entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayrollStatus {
    /// Created by a payroll run, awaiting payment.
    Pending,
    /// Paid out.
    Paid,
}

/// A payroll snapshot for one employee and period.
///
/// Entries are written once per payroll run and never recomputed; running
/// payroll twice for the same period produces two entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// Unique identifier of the entry.
    pub id: Uuid,
    /// Identifier of the run that produced this entry.
    pub run_id: Uuid,
    /// The employee being paid.
    pub employee_id: String,
    /// Payroll month (1-12).
    pub period_month: u32,
    /// Payroll year.
    pub period_year: i32,
    /// Basic salary after tier lookup and pro-ration.
    pub basic_salary: Decimal,
    /// Allowances.
    pub allowances: Decimal,
    /// Deductions.
    pub deductions: Decimal,
    /// Bonuses.
    pub bonuses: Decimal,
    /// Overtime pay.
    pub overtime_pay: Decimal,
    /// basic + bonuses + allowances + overtime.
    pub total_salary: Decimal,
    /// total - deductions; may be negative.
    pub net_salary: Decimal,
    /// Work-days credited for the period.
    pub work_days: u32,
    /// Free-text explanation of the salary basis.
    pub notes: String,
    /// Approval status.
    pub status: PayrollStatus,
    /// When the run was executed.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_capitalised() {
        assert_eq!(
            serde_json::to_string(&PayrollStatus::Pending).unwrap(),
            "\"Pending\""
        );
    }

    #[test]
    fn test_entry_serializes_money_as_strings() {
        let entry = PayrollEntry {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            employee_id: "crew_001".to_string(),
            period_month: 1,
            period_year: 2026,
            basic_salary: Decimal::ZERO,
            allowances: Decimal::ZERO,
            deductions: Decimal::new(50_000, 0),
            bonuses: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            total_salary: Decimal::ZERO,
            net_salary: Decimal::new(-50_000, 0),
            work_days: 0,
            notes: "No Join Date".to_string(),
            status: PayrollStatus::Pending,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"net_salary\":\"-50000\""));
        assert!(json.contains("\"status\":\"Pending\""));
    }
}
