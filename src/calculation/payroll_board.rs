//! Payroll drafting board.
//!
//! A [`PayrollBoard`] holds one [`PayrollDraft`] per active employee for a
//! period. Every change goes through a pure update that returns a new board,
//! so a preview can be recomputed from the same inputs at any time and the
//! original board is never touched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceCounts, AttendanceSummary, AuditStep, AuditWarning, Employee, EmploymentContract,
    PayrollEntry, PayrollPeriod, PayrollStatus,
};

use super::{DeductionPolicy, derive_base_salary, prorate_first_month};

/// One employee's in-progress payroll for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDraft {
    /// The employee being paid.
    pub employee_id: String,
    /// The employee's full name.
    pub full_name: String,
    /// Outlet display name, if assigned.
    pub outlet_name: Option<String>,
    /// 1-based month of service; `None` without a join date.
    pub month_nth: Option<u32>,
    /// Tier rate of a tiered month, the basis of pro-ration.
    pub tier_rate: Option<Decimal>,
    /// Basic salary after tier lookup and pro-ration.
    pub basic_salary: Decimal,
    /// Work-days credited.
    pub work_days: u32,
    /// Bonus.
    pub bonus: Decimal,
    /// Allowance.
    pub allowance: Decimal,
    /// Overtime pay.
    pub overtime: Decimal,
    /// Manually entered deduction.
    pub deduction: Decimal,
    /// Deductions injected by policies, by rule id.
    pub policy_deductions: BTreeMap<String, Decimal>,
    /// Attendance counters once synced.
    pub attendance: Option<AttendanceCounts>,
    /// Whether work-days came from an attendance summary.
    pub attendance_synced: bool,
    /// Basis of the basic salary.
    pub salary_note: String,
    /// Attendance breakdown once synced.
    pub attendance_note: Option<String>,
    /// Pro-ration basis once pro-rated.
    pub proration_note: Option<String>,
    /// Every rule applied to this draft, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Input defects found while drafting.
    pub warnings: Vec<AuditWarning>,
}

impl PayrollDraft {
    /// A draft with no salary basis yet.
    pub(crate) fn blank(employee_id: &str, full_name: &str, work_days: u32) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            full_name: full_name.to_string(),
            outlet_name: None,
            month_nth: None,
            tier_rate: None,
            basic_salary: Decimal::ZERO,
            work_days,
            bonus: Decimal::ZERO,
            allowance: Decimal::ZERO,
            overtime: Decimal::ZERO,
            deduction: Decimal::ZERO,
            policy_deductions: BTreeMap::new(),
            attendance: None,
            attendance_synced: false,
            salary_note: String::new(),
            attendance_note: None,
            proration_note: None,
            audit_steps: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Manual plus injected deductions.
    pub fn total_deductions(&self) -> Decimal {
        self.deduction + self.policy_deductions.values().copied().sum::<Decimal>()
    }

    /// basic + bonus + allowance + overtime.
    pub fn total_salary(&self) -> Decimal {
        self.basic_salary + self.bonus + self.allowance + self.overtime
    }

    /// Total salary minus deductions. Not clamped: may be negative.
    pub fn net_salary(&self) -> Decimal {
        self.total_salary() - self.total_deductions()
    }

    /// The free-text notes written on the payroll entry.
    pub fn notes(&self) -> String {
        std::iter::once(self.salary_note.as_str())
            .chain(self.attendance_note.as_deref())
            .chain(self.proration_note.as_deref())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn next_step(&self) -> u32 {
        u32::try_from(self.audit_steps.len()).map_or(u32::MAX, |n| n.saturating_add(1))
    }

    /// Sets work-days, pro-rating the basic salary in month 1.
    fn set_work_days(&mut self, work_days: u32, standard_days: u32) {
        self.work_days = work_days;

        if self.month_nth != Some(1) {
            return;
        }
        if let Some(rate) = self.tier_rate {
            let result = prorate_first_month(rate, work_days, standard_days, self.next_step());
            self.basic_salary = result.basic_salary;
            self.proration_note = Some(result.note);
            self.audit_steps.push(result.audit_step);
        }
    }
}

/// A manual change to one draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum PayrollEdit {
    /// Set work-days; pro-rates month-1 salaries.
    WorkDays {
        /// The employee to edit.
        employee_id: String,
        /// New work-days.
        value: u32,
    },
    /// Set the bonus.
    Bonus {
        /// The employee to edit.
        employee_id: String,
        /// New amount.
        value: Decimal,
    },
    /// Set the allowance.
    Allowance {
        /// The employee to edit.
        employee_id: String,
        /// New amount.
        value: Decimal,
    },
    /// Set the manual deduction.
    Deduction {
        /// The employee to edit.
        employee_id: String,
        /// New amount.
        value: Decimal,
    },
    /// Set overtime pay.
    Overtime {
        /// The employee to edit.
        employee_id: String,
        /// New amount.
        value: Decimal,
    },
}

impl PayrollEdit {
    /// The employee this edit targets.
    pub fn employee_id(&self) -> &str {
        match self {
            PayrollEdit::WorkDays { employee_id, .. }
            | PayrollEdit::Bonus { employee_id, .. }
            | PayrollEdit::Allowance { employee_id, .. }
            | PayrollEdit::Deduction { employee_id, .. }
            | PayrollEdit::Overtime { employee_id, .. } => employee_id,
        }
    }
}

/// Payroll drafts for every active employee in a period, keyed by
/// employee id.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollBoard {
    period: PayrollPeriod,
    standard_working_days: u32,
    drafts: BTreeMap<String, PayrollDraft>,
}

impl PayrollBoard {
    /// Drafts payroll for every active employee.
    ///
    /// Each draft starts from the derived base salary, the configured
    /// default work-days and zero bonus, allowance, deduction and overtime.
    /// When an employee has several active contracts the latest one is used.
    pub fn build(
        employees: &[Employee],
        contracts: &[EmploymentContract],
        period: PayrollPeriod,
        config: &EngineConfig,
    ) -> Self {
        let rules = config.payroll();

        let drafts = employees
            .iter()
            .filter(|e| e.is_active)
            .map(|employee| {
                let contract = contracts
                    .iter()
                    .filter(|c| c.is_active && c.employee_id == employee.id)
                    .max_by_key(|c| c.start_date);

                let base = derive_base_salary(employee.join_date, contract, period, config, 1);

                let mut draft =
                    PayrollDraft::blank(&employee.id, &employee.full_name, rules.default_work_days);
                draft.outlet_name = employee.outlet_name().map(str::to_string);
                draft.month_nth = base.month_nth;
                draft.tier_rate = base.tier_rate;
                draft.basic_salary = base.basic_salary;
                draft.salary_note = base.note;
                draft.audit_steps.push(base.audit_step);
                draft.warnings = base.warnings;

                (employee.id.clone(), draft)
            })
            .collect::<BTreeMap<_, _>>();

        debug!(period = %period, drafts = drafts.len(), "Built payroll board");

        Self {
            period,
            standard_working_days: rules.standard_working_days,
            drafts,
        }
    }

    /// The period being drafted.
    pub fn period(&self) -> PayrollPeriod {
        self.period
    }

    /// Drafts ordered by employee id.
    pub fn drafts(&self) -> impl Iterator<Item = &PayrollDraft> {
        self.drafts.values()
    }

    /// The draft of one employee.
    pub fn get(&self, employee_id: &str) -> Option<&PayrollDraft> {
        self.drafts.get(employee_id)
    }

    /// Number of drafts.
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Returns true if no employee is being paid.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Applies a manual edit, returning the updated board.
    ///
    /// Amounts must not be negative; unknown employees are an error.
    ///
    /// # Example
    ///
    /// ```
    /// use hris_engine::calculation::{PayrollBoard, PayrollEdit};
    /// use hris_engine::config::EngineConfig;
    /// use hris_engine::models::{Employee, PayrollPeriod, Role};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "crew_001".to_string(),
    ///     full_name: "Budi Santoso".to_string(),
    ///     role: Role::Crew,
    ///     is_active: true,
    ///     join_date: None,
    ///     resign_date: None,
    ///     outlet: None,
    ///     distance_km: None,
    ///     bank_name: None,
    ///     bank_account_number: None,
    /// };
    /// let period = PayrollPeriod::new(1, 2026).unwrap();
    /// let board = PayrollBoard::build(&[employee], &[], period, &EngineConfig::default());
    ///
    /// let edited = board
    ///     .apply(&PayrollEdit::Deduction {
    ///         employee_id: "crew_001".to_string(),
    ///         value: Decimal::new(50_000, 0),
    ///     })
    ///     .unwrap();
    /// assert_eq!(edited.get("crew_001").unwrap().net_salary(), Decimal::new(-50_000, 0));
    /// ```
    pub fn apply(&self, edit: &PayrollEdit) -> EngineResult<Self> {
        let employee_id = edit.employee_id();
        let mut next = self.clone();
        let standard_days = self.standard_working_days;
        let Some(draft) = next.drafts.get_mut(employee_id) else {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        };

        match edit {
            PayrollEdit::WorkDays { value, .. } => draft.set_work_days(*value, standard_days),
            PayrollEdit::Bonus { value, .. } => draft.bonus = non_negative("bonus", *value)?,
            PayrollEdit::Allowance { value, .. } => {
                draft.allowance = non_negative("allowance", *value)?
            }
            PayrollEdit::Deduction { value, .. } => {
                draft.deduction = non_negative("deduction", *value)?
            }
            PayrollEdit::Overtime { value, .. } => {
                draft.overtime = non_negative("overtime", *value)?
            }
        }

        Ok(next)
    }

    /// Applies several edits in order, stopping at the first error.
    pub fn apply_all(&self, edits: &[PayrollEdit]) -> EngineResult<Self> {
        edits
            .iter()
            .try_fold(self.clone(), |board, edit| board.apply(edit))
    }

    /// Sets work-days from attendance summaries of this period.
    ///
    /// Work-days become present plus present-late. The basic salary is left
    /// as drafted: only a [`PayrollEdit::WorkDays`] edit pro-rates month 1.
    /// Summaries for other periods or unknown employees are ignored. Returns
    /// the updated board and the number of drafts synced.
    pub fn sync_attendance(&self, summaries: &[AttendanceSummary]) -> (Self, usize) {
        let mut next = self.clone();
        let mut synced = 0;

        for summary in summaries.iter().filter(|s| s.is_for(self.period)) {
            let Some(draft) = next.drafts.get_mut(&summary.employee_id) else {
                continue;
            };

            let counts = summary.counts;
            let work_days = counts.work_days();
            draft.attendance = Some(counts);
            draft.attendance_synced = true;
            draft.attendance_note = Some(format!(
                "Present: {} | Absent: {} | Permitted: {}",
                work_days, counts.a, counts.i
            ));
            let step_number = draft.next_step();
            draft.audit_steps.push(AuditStep {
                step_number,
                rule_id: "attendance_sync".to_string(),
                rule_name: "Attendance Sync".to_string(),
                input: serde_json::json!({
                    "h": counts.h,
                    "ht": counts.ht,
                    "a": counts.a,
                    "i": counts.i
                }),
                output: serde_json::json!({ "work_days": work_days }),
                reasoning: format!(
                    "Work-days = present {} + present late {} = {}",
                    counts.h, counts.ht, work_days
                ),
            });
            draft.work_days = work_days;
            synced += 1;
        }

        debug!(period = %self.period, synced, "Synced attendance into payroll board");
        (next, synced)
    }

    /// Records the deduction a policy computes for every draft.
    ///
    /// The amount is stored under the policy's rule id, replacing any
    /// earlier amount from the same policy. Drafts the policy does not
    /// apply to lose their earlier amount from that policy.
    pub fn inject_deductions(&self, policy: &dyn DeductionPolicy) -> Self {
        let mut next = self.clone();
        let rule_id = policy.rule_id();

        for draft in next.drafts.values_mut() {
            match policy.deduction_for(draft) {
                Some(amount) => {
                    let amount = amount.max(Decimal::ZERO);
                    let step_number = draft.next_step();
                    draft.audit_steps.push(AuditStep {
                        step_number,
                        rule_id: rule_id.to_string(),
                        rule_name: "Deduction Injection".to_string(),
                        input: serde_json::json!({ "employee_id": draft.employee_id }),
                        output: serde_json::json!({ "deduction": amount.to_string() }),
                        reasoning: format!("Policy '{}' deducts {}", rule_id, amount),
                    });
                    draft.policy_deductions.insert(rule_id.to_string(), amount);
                }
                None => {
                    draft.policy_deductions.remove(rule_id);
                }
            }
        }

        next
    }

    /// Turns the drafts into payroll entries for one run.
    pub fn into_entries(self, run_id: Uuid, run_at: DateTime<Utc>) -> Vec<PayrollEntry> {
        let period = self.period;
        self.drafts
            .into_values()
            .map(|draft| PayrollEntry {
                id: Uuid::new_v4(),
                run_id,
                employee_id: draft.employee_id.clone(),
                period_month: period.month,
                period_year: period.year,
                basic_salary: draft.basic_salary,
                allowances: draft.allowance,
                deductions: draft.total_deductions(),
                bonuses: draft.bonus,
                overtime_pay: draft.overtime,
                total_salary: draft.total_salary(),
                net_salary: draft.net_salary(),
                work_days: draft.work_days,
                notes: draft.notes(),
                status: PayrollStatus::Pending,
                created_at: run_at,
            })
            .collect()
    }
}

fn non_negative(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!("{} must not be negative, got {}", field, value),
        });
    }
    Ok(value)
}
