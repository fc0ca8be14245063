//! Cash advance (salary advance) model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored status of a cash advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashAdvanceStatus {
    /// Submitted by the employee, waiting for an admin.
    Pending,
    /// Approved; repaid through payroll deductions.
    Approved,
    /// Rejected by an admin.
    Rejected,
    /// Fully repaid.
    PaidOff,
}

/// Display standing derived from status and remaining balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceStanding {
    /// Waiting for approval.
    AwaitingApproval,
    /// Approved with an outstanding balance.
    Active,
    /// Rejected.
    Rejected,
    /// Nothing left to repay.
    Settled,
}

/// A request by an employee to draw part of their salary in advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashAdvance {
    /// Unique identifier.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: String,
    /// Amount requested.
    pub amount: Decimal,
    /// Why the advance is needed.
    pub reason: String,
    /// Monthly deduction; proposed by the employee, fixed on approval.
    pub deduction_plan_amount: Decimal,
    /// Date of the request.
    pub request_date: NaiveDate,
    /// Stored status.
    pub status: CashAdvanceStatus,
    /// Amount granted; zero until approved.
    pub approved_amount: Decimal,
    /// Balance still to be repaid.
    pub remaining_amount: Decimal,
    /// The employee agreed to salary deductions.
    pub agreement_statement: bool,
}

impl CashAdvance {
    /// Derives the display standing.
    ///
    /// An approved advance whose balance has reached zero reads as settled
    /// even before its status is moved to `PaidOff`.
    pub fn standing(&self) -> AdvanceStanding {
        match self.status {
            CashAdvanceStatus::Pending => AdvanceStanding::AwaitingApproval,
            CashAdvanceStatus::Rejected => AdvanceStanding::Rejected,
            CashAdvanceStatus::PaidOff => AdvanceStanding::Settled,
            CashAdvanceStatus::Approved if self.remaining_amount > Decimal::ZERO => {
                AdvanceStanding::Active
            }
            CashAdvanceStatus::Approved => AdvanceStanding::Settled,
        }
    }

    /// The deduction due this month: the plan amount, capped at the balance.
    pub fn monthly_installment(&self) -> Decimal {
        if self.standing() != AdvanceStanding::Active {
            return Decimal::ZERO;
        }
        self.deduction_plan_amount
            .min(self.remaining_amount)
            .max(Decimal::ZERO)
    }
}
