//! First-month pro-ration.
//!
//! An employee in their first month of service is paid for the days they
//! actually worked: `floor(tier rate x work-days / standard days)`.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of pro-rating a first-month salary.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// The pro-rated basic salary, in whole currency units.
    pub basic_salary: Decimal,
    /// Human-readable basis, appended to the draft notes.
    pub note: String,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Pro-rates the month-1 tier rate by work-days.
///
/// The multiplication happens before the division so that exact fractions
/// floor to the expected figure.
///
/// # Example
///
/// ```
/// use hris_engine::calculation::prorate_first_month;
/// use rust_decimal::Decimal;
///
/// let result = prorate_first_month(Decimal::new(2_000_000, 0), 13, 26, 2);
/// assert_eq!(result.basic_salary, Decimal::new(1_000_000, 0));
/// ```
pub fn prorate_first_month(
    tier_rate: Decimal,
    work_days: u32,
    standard_days: u32,
    step_number: u32,
) -> ProrationResult {
    let basic_salary = if standard_days == 0 {
        tier_rate
    } else {
        (tier_rate * Decimal::from(work_days) / Decimal::from(standard_days)).floor()
    };

    ProrationResult {
        basic_salary,
        note: format!("Pro-rated month 1 ({} days)", work_days),
        audit_step: AuditStep {
            step_number,
            rule_id: "first_month_proration".to_string(),
            rule_name: "First Month Pro-ration".to_string(),
            input: serde_json::json!({
                "tier_rate": tier_rate.to_string(),
                "work_days": work_days,
                "standard_days": standard_days
            }),
            output: serde_json::json!({
                "basic_salary": basic_salary.to_string()
            }),
            reasoning: format!(
                "floor({} x {} / {}) = {}",
                tier_rate, work_days, standard_days, basic_salary
            ),
        },
    }
}
