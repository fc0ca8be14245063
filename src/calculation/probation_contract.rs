//! Probation contract drafting.
//!
//! New hires start on a fixed-length probation contract. The contract
//! captures the salary schedule of the tiered months and pays the month-1
//! rate as its base salary.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ContractRules, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{EmploymentContract, ExperienceLevel};

const ROMAN_MONTHS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

/// What an applicant provides for their probation contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbationApplicant {
    /// The employee the contract is for.
    pub employee_id: String,
    /// First working day.
    pub start_date: NaiveDate,
    /// Prior experience.
    pub experience_level: ExperienceLevel,
    /// Name of the outlet the applicant will work at.
    pub outlet_name: String,
    /// Running number printed in the contract number.
    pub sequence: u32,
}

/// Roman numeral of a month (1-12).
pub fn roman_month(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    ROMAN_MONTHS.get(index).copied()
}

/// Formats a contract number: `{prefix}/{seq:03}/{series}/{roman month}/{year}`.
///
/// # Example
///
/// ```
/// use hris_engine::calculation::contract_number;
/// use hris_engine::config::ContractRules;
/// use chrono::NaiveDate;
///
/// let issued = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// assert_eq!(
///     contract_number(&ContractRules::default(), 42, issued),
///     "14/042/HRD-KKPTTP/III/2026"
/// );
/// ```
pub fn contract_number(rules: &ContractRules, sequence: u32, issued_on: NaiveDate) -> String {
    format!(
        "{}/{:03}/{}/{}/{}",
        rules.number_prefix,
        sequence,
        rules.number_series,
        roman_month(issued_on.month()).unwrap_or_default(),
        issued_on.year()
    )
}

/// Drafts a probation contract for an applicant.
///
/// The outlet type comes from the outlet catalogue. The end date is the
/// start date plus the probation length.
pub fn draft_probation_contract(
    applicant: &ProbationApplicant,
    issued_on: NaiveDate,
    config: &EngineConfig,
) -> EngineResult<EmploymentContract> {
    let rules = config.contracts();
    let outlet_type = rules.outlet_type_for(&applicant.outlet_name);

    let end_date = applicant
        .start_date
        .checked_add_months(Months::new(rules.probation_months))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "Contract end date out of range for start {}",
                applicant.start_date
            ),
        })?;

    let schedule = config
        .salary_matrix()
        .tiers(applicant.experience_level, outlet_type)
        .to_vec();
    let base_salary = schedule
        .first()
        .copied()
        .ok_or_else(|| EngineError::CalculationError {
            message: "Salary matrix has no month-1 rate".to_string(),
        })?;

    debug!(
        employee_id = %applicant.employee_id,
        outlet_type = %outlet_type,
        base_salary = %base_salary,
        "Drafted probation contract"
    );

    Ok(EmploymentContract {
        employee_id: applicant.employee_id.clone(),
        contract_number: Some(contract_number(rules, applicant.sequence, issued_on)),
        start_date: applicant.start_date,
        end_date: Some(end_date),
        contract_type: rules.contract_type.clone(),
        experience_level: Some(applicant.experience_level),
        outlet_type: Some(outlet_type),
        base_salary,
        salary_schedule: schedule,
        daily_meal_allowance: rules.daily_meal_allowance,
        is_active: true,
        created_at: None,
    })
}
