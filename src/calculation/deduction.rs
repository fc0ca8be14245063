//! Computed payroll deductions.
//!
//! Deductions are entered by hand unless a [`DeductionPolicy`] is injected
//! into the [`PayrollBoard`](super::PayrollBoard). Each policy contributes
//! under its own rule id, so re-injecting a policy replaces its previous
//! amount instead of adding to it.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::CashAdvance;

use super::{PayrollBoard, PayrollDraft, record_repayment};

/// Computes a deduction for a payroll draft.
pub trait DeductionPolicy: Send + Sync {
    /// Identifier under which the amount is recorded on the draft.
    fn rule_id(&self) -> &'static str;

    /// The amount to deduct, or `None` when the policy does not apply.
    fn deduction_for(&self, draft: &PayrollDraft) -> Option<Decimal>;
}

/// A fixed penalty per unexcused absence (A) on synced attendance.
///
/// # Example
///
/// ```
/// use hris_engine::calculation::{DeductionPolicy, UnexcusedAbsencePenalty};
/// use rust_decimal::Decimal;
///
/// let policy = UnexcusedAbsencePenalty::new(Decimal::new(50_000, 0));
/// assert_eq!(policy.rule_id(), "unexcused_absence_penalty");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UnexcusedAbsencePenalty {
    per_day: Decimal,
}

impl UnexcusedAbsencePenalty {
    /// Creates a penalty of `per_day` per unexcused absence.
    pub fn new(per_day: Decimal) -> Self {
        Self { per_day }
    }
}

impl DeductionPolicy for UnexcusedAbsencePenalty {
    fn rule_id(&self) -> &'static str {
        "unexcused_absence_penalty"
    }

    fn deduction_for(&self, draft: &PayrollDraft) -> Option<Decimal> {
        let absences = draft.attendance?.a;
        Some(self.per_day * Decimal::from(absences))
    }
}

/// The monthly installments of active cash advances, per employee.
///
/// Deducting an installment does not touch the advance. A payroll run that
/// keeps the deduction must also store the advances returned by
/// [`collect`](Self::collect), or the next run charges the same balance
/// again.
#[derive(Debug, Clone, Default)]
pub struct CashAdvanceInstallment {
    installments: HashMap<String, Decimal>,
    due: Vec<CashAdvance>,
}

impl CashAdvanceInstallment {
    /// Sums the installment of every active advance per employee.
    pub fn from_advances(advances: &[CashAdvance]) -> Self {
        let mut installments: HashMap<String, Decimal> = HashMap::new();
        let mut due = Vec::new();
        for advance in advances {
            let installment = advance.monthly_installment();
            if installment > Decimal::ZERO {
                *installments.entry(advance.employee_id.clone()).or_default() += installment;
                due.push(advance.clone());
            }
        }
        Self { installments, due }
    }

    /// The advances after repaying the installments deducted on `board`.
    ///
    /// Advances of employees without a draft, or whose draft does not carry
    /// this policy's deduction, are left out.
    pub fn collect(&self, board: &PayrollBoard) -> EngineResult<Vec<CashAdvance>> {
        self.due
            .iter()
            .filter(|advance| {
                board
                    .get(&advance.employee_id)
                    .is_some_and(|draft| draft.policy_deductions.contains_key(self.rule_id()))
            })
            .map(|advance| record_repayment(advance, advance.monthly_installment()))
            .collect()
    }
}

impl DeductionPolicy for CashAdvanceInstallment {
    fn rule_id(&self) -> &'static str {
        "cash_advance_installment"
    }

    fn deduction_for(&self, draft: &PayrollDraft) -> Option<Decimal> {
        self.installments.get(&draft.employee_id).copied()
    }
}
