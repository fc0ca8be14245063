//! Cash advance workflow.
//!
//! Transitions are pure: each takes the current advance and returns the
//! next state, or an error when the transition is not allowed.
//!
//! ```text
//! pending --approve--> approved --repay to zero--> paid_off
//!    |                    |
//!    +--reject--> rejected  +--approve (adjust amount/plan)
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{CashAdvance, CashAdvanceStatus};

/// A crew member's request for an advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceRequest {
    /// The requesting employee.
    pub employee_id: String,
    /// Amount requested.
    pub amount: Decimal,
    /// Why the advance is needed.
    pub reason: String,
    /// Proposed monthly deduction.
    #[serde(default)]
    pub deduction_plan_amount: Option<Decimal>,
    /// The employee agreed to salary deductions.
    #[serde(default)]
    pub agreement_statement: bool,
}

/// An admin's approval terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    /// Amount granted.
    pub approved_amount: Decimal,
    /// Monthly deduction; defaults to the requested plan, then the full amount.
    #[serde(default)]
    pub deduction_plan_amount: Option<Decimal>,
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidCashAdvance {
        message: message.into(),
    }
}

/// Creates a pending advance from a request.
pub fn submit_advance(
    request: &AdvanceRequest,
    request_date: NaiveDate,
) -> EngineResult<CashAdvance> {
    if request.amount <= Decimal::ZERO {
        return Err(invalid("amount must be positive"));
    }
    if request.reason.trim().is_empty() {
        return Err(invalid("reason is required"));
    }
    let plan = request.deduction_plan_amount.unwrap_or(Decimal::ZERO);
    if plan < Decimal::ZERO {
        return Err(invalid("deduction plan must not be negative"));
    }

    Ok(CashAdvance {
        id: Uuid::new_v4(),
        employee_id: request.employee_id.clone(),
        amount: request.amount,
        reason: request.reason.trim().to_string(),
        deduction_plan_amount: plan,
        request_date,
        status: CashAdvanceStatus::Pending,
        approved_amount: Decimal::ZERO,
        remaining_amount: Decimal::ZERO,
        agreement_statement: request.agreement_statement,
    })
}

/// Approves a pending advance, or adjusts the terms of an approved one.
///
/// The remaining balance is set to the approved amount only when a pending
/// advance is approved; adjusting an approved advance keeps its balance.
pub fn approve_advance(
    advance: &CashAdvance,
    decision: &ApprovalDecision,
) -> EngineResult<CashAdvance> {
    if !matches!(
        advance.status,
        CashAdvanceStatus::Pending | CashAdvanceStatus::Approved
    ) {
        return Err(invalid(format!(
            "cannot approve an advance with status {:?}",
            advance.status
        )));
    }
    if decision.approved_amount <= Decimal::ZERO {
        return Err(invalid("approved amount must be positive"));
    }

    let plan = decision
        .deduction_plan_amount
        .or(Some(advance.deduction_plan_amount).filter(|p| *p > Decimal::ZERO))
        .unwrap_or(decision.approved_amount);
    if plan <= Decimal::ZERO {
        return Err(invalid("deduction plan must be positive"));
    }

    let remaining_amount = if advance.status == CashAdvanceStatus::Pending {
        decision.approved_amount
    } else {
        advance.remaining_amount
    };

    Ok(CashAdvance {
        status: CashAdvanceStatus::Approved,
        approved_amount: decision.approved_amount,
        deduction_plan_amount: plan,
        remaining_amount,
        ..advance.clone()
    })
}

/// Rejects a pending advance.
pub fn reject_advance(advance: &CashAdvance) -> EngineResult<CashAdvance> {
    if advance.status != CashAdvanceStatus::Pending {
        return Err(invalid(format!(
            "only pending advances can be rejected, status is {:?}",
            advance.status
        )));
    }

    Ok(CashAdvance {
        status: CashAdvanceStatus::Rejected,
        approved_amount: Decimal::ZERO,
        remaining_amount: Decimal::ZERO,
        ..advance.clone()
    })
}

/// Records a repayment against an approved advance.
///
/// The balance never drops below zero; reaching zero marks the advance
/// paid off.
pub fn record_repayment(advance: &CashAdvance, amount: Decimal) -> EngineResult<CashAdvance> {
    if advance.status != CashAdvanceStatus::Approved {
        return Err(invalid(format!(
            "repayments need an approved advance, status is {:?}",
            advance.status
        )));
    }
    if amount <= Decimal::ZERO {
        return Err(invalid("repayment must be positive"));
    }

    let remaining_amount = (advance.remaining_amount - amount).max(Decimal::ZERO);
    let status = if remaining_amount.is_zero() {
        CashAdvanceStatus::PaidOff
    } else {
        CashAdvanceStatus::Approved
    };

    Ok(CashAdvance {
        status,
        remaining_amount,
        ..advance.clone()
    })
}
