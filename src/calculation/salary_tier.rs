//! Tenure-tiered base salary derivation.
//!
//! During the first months of service an employee is paid a fixed rate from
//! the [`SalaryMatrix`](crate::config::SalaryMatrix), chosen by experience
//! level, outlet type and month of service. Afterwards the contract base
//! salary applies.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::models::{
    AuditStep, AuditWarning, EmploymentContract, PayrollPeriod, WarningSeverity,
};

/// Note recorded when the employee has no join date.
pub const NO_JOIN_DATE_NOTE: &str = "No Join Date";

/// Note recorded when the contract base salary is paid.
pub const CONTRACT_SALARY_NOTE: &str = "Normal salary (contract)";

/// Note recorded when the contract base salary is due but there is no contract.
pub const NO_CONTRACT_NOTE: &str = "No contract";

/// The result of deriving a base salary, including the audit step.
#[derive(Debug, Clone)]
pub struct BaseSalaryResult {
    /// The derived monthly basic salary.
    pub basic_salary: Decimal,
    /// 1-based month of service; `None` without a join date.
    pub month_nth: Option<u32>,
    /// The tier rate when the month is tiered; basis of pro-ration.
    pub tier_rate: Option<Decimal>,
    /// Human-readable basis of the figure.
    pub note: String,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
    /// Warnings about missing input.
    pub warnings: Vec<AuditWarning>,
}

/// Months of service at a reference date, counting the join month as
/// month 1. Never less than 1.
///
/// # Example
///
/// ```
/// use hris_engine::calculation::months_of_service;
/// use chrono::NaiveDate;
///
/// let joined = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
/// let reference = NaiveDate::from_ymd_opt(2026, 1, 25).unwrap();
/// assert_eq!(months_of_service(joined, reference), 3);
/// ```
pub fn months_of_service(join_date: NaiveDate, reference: NaiveDate) -> u32 {
    let months = i64::from(reference.year() - join_date.year()) * 12
        + i64::from(reference.month()) - i64::from(join_date.month())
        + 1;
    u32::try_from(months.max(1)).unwrap_or(u32::MAX)
}

/// Derives the basic salary of an employee for a payroll period.
///
/// # Rules
///
/// - Without a join date the salary is 0 with note "No Join Date".
/// - Tiered months pay the matrix rate. Missing contract tags fall back to
///   the configured defaults.
/// - Later months pay the contract base salary, or 0 without a contract.
///
/// Missing data never fails the derivation; it is reported as warnings.
pub fn derive_base_salary(
    join_date: Option<NaiveDate>,
    contract: Option<&EmploymentContract>,
    period: PayrollPeriod,
    config: &EngineConfig,
    step_number: u32,
) -> BaseSalaryResult {
    let rules = config.payroll();
    let reference = period.reference_date(rules.reference_day);
    let mut warnings = Vec::new();

    if contract.is_none() {
        warnings.push(AuditWarning::new(
            "NO_CONTRACT",
            "No active contract; salary tags use configured defaults",
            WarningSeverity::Medium,
        ));
    }

    let Some(join_date) = join_date else {
        warnings.push(AuditWarning::new(
            "NO_JOIN_DATE",
            "Join date is missing; basic salary is 0",
            WarningSeverity::High,
        ));
        return BaseSalaryResult {
            basic_salary: Decimal::ZERO,
            month_nth: None,
            tier_rate: None,
            note: NO_JOIN_DATE_NOTE.to_string(),
            audit_step: AuditStep {
                step_number,
                rule_id: "salary_tier".to_string(),
                rule_name: "Tenure Salary Tier".to_string(),
                input: serde_json::json!({
                    "join_date": null,
                    "reference_date": reference.to_string()
                }),
                output: serde_json::json!({
                    "basic_salary": "0",
                    "source": "missing_join_date"
                }),
                reasoning: "Join date missing; basic salary defaults to 0".to_string(),
            },
            warnings,
        };
    };

    let month_nth = months_of_service(join_date, reference);
    let experience = contract
        .and_then(|c| c.experience_level)
        .unwrap_or(rules.default_experience_level);
    let outlet = contract
        .and_then(|c| c.outlet_type)
        .unwrap_or(rules.default_outlet_type);

    let input = serde_json::json!({
        "join_date": join_date.to_string(),
        "reference_date": reference.to_string(),
        "month_nth": month_nth,
        "experience_level": experience.to_string(),
        "outlet_type": outlet.to_string()
    });

    if let Some(rate) = config.salary_matrix().rate(experience, outlet, month_nth) {
        return BaseSalaryResult {
            basic_salary: rate,
            month_nth: Some(month_nth),
            tier_rate: Some(rate),
            note: format!("Month {} rate ({}, {})", month_nth, experience, outlet),
            audit_step: AuditStep {
                step_number,
                rule_id: "salary_tier".to_string(),
                rule_name: "Tenure Salary Tier".to_string(),
                input,
                output: serde_json::json!({
                    "basic_salary": rate.to_string(),
                    "source": "salary_matrix"
                }),
                reasoning: format!(
                    "Month {} of service is tiered: {} {} rate {}",
                    month_nth, experience, outlet, rate
                ),
            },
            warnings,
        };
    }

    let (basic_salary, note, source) = match contract {
        Some(c) => (c.base_salary, CONTRACT_SALARY_NOTE, "contract"),
        None => {
            warnings.push(AuditWarning::new(
                "NO_CONTRACT_SALARY",
                "Tiered months are over and there is no contract; basic salary is 0",
                WarningSeverity::High,
            ));
            (Decimal::ZERO, NO_CONTRACT_NOTE, "missing_contract")
        }
    };

    BaseSalaryResult {
        basic_salary,
        month_nth: Some(month_nth),
        tier_rate: None,
        note: note.to_string(),
        audit_step: AuditStep {
            step_number,
            rule_id: "salary_tier".to_string(),
            rule_name: "Tenure Salary Tier".to_string(),
            input,
            output: serde_json::json!({
                "basic_salary": basic_salary.to_string(),
                "source": source
            }),
            reasoning: format!(
                "Month {} of service is past the tiered months; paying {} {}",
                month_nth, source, basic_salary
            ),
        },
        warnings,
    }
}
