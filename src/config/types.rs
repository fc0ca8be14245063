//! Configuration types for the HRIS engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Each structure's
//! `Default` carries the same values as the files shipped in
//! `config/hris/`.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ExperienceLevel, OutletType};

/// Payroll rules from `payroll.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRules {
    /// Day of the payroll month used as the tenure reference point.
    pub reference_day: u32,
    /// Denominator of the first-month pro-ration.
    pub standard_working_days: u32,
    /// Work-days assumed on a fresh draft before attendance is synced.
    pub default_work_days: u32,
    /// Experience tag used when a contract lacks one.
    pub default_experience_level: ExperienceLevel,
    /// Outlet-type tag used when a contract lacks one.
    pub default_outlet_type: OutletType,
    /// Optional penalty per unexcused absence; `None` leaves deductions manual.
    #[serde(default)]
    pub absence_penalty_per_day: Option<Decimal>,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            reference_day: 25,
            standard_working_days: 26,
            default_work_days: 26,
            default_experience_level: ExperienceLevel::Inexperienced,
            default_outlet_type: OutletType::Express,
            absence_penalty_per_day: None,
        }
    }
}

/// Monthly rates for the tiered months, month 1 first, for both outlet types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutletRates {
    /// Rates at dine-in outlets.
    pub dine_in: Vec<Decimal>,
    /// Rates at express outlets.
    pub express: Vec<Decimal>,
}

/// The tenure salary matrix from `salary_matrix.yaml`.
///
/// Indexed by experience level, outlet type and month of service. Months
/// past the end of a row fall back to the contract base salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryMatrix {
    /// Rates for experienced hires.
    pub experienced: OutletRates,
    /// Rates for inexperienced hires.
    pub inexperienced: OutletRates,
}

impl SalaryMatrix {
    /// The tier row for a combination of tags.
    pub fn tiers(&self, level: ExperienceLevel, outlet: OutletType) -> &[Decimal] {
        let rates = match level {
            ExperienceLevel::Experienced => &self.experienced,
            ExperienceLevel::Inexperienced => &self.inexperienced,
        };
        match outlet {
            OutletType::DineIn => &rates.dine_in,
            OutletType::Express => &rates.express,
        }
    }

    /// The rate for a 1-based month of service, if that month is tiered.
    ///
    /// # Example
    ///
    /// ```
    /// use hris_engine::config::SalaryMatrix;
    /// use hris_engine::models::{ExperienceLevel, OutletType};
    /// use rust_decimal::Decimal;
    ///
    /// let matrix = SalaryMatrix::default();
    /// assert_eq!(
    ///     matrix.rate(ExperienceLevel::Experienced, OutletType::Express, 3),
    ///     Some(Decimal::new(1_500_000, 0))
    /// );
    /// assert_eq!(matrix.rate(ExperienceLevel::Experienced, OutletType::Express, 4), None);
    /// ```
    pub fn rate(
        &self,
        level: ExperienceLevel,
        outlet: OutletType,
        month_nth: u32,
    ) -> Option<Decimal> {
        let index = usize::try_from(month_nth.checked_sub(1)?).ok()?;
        self.tiers(level, outlet).get(index).copied()
    }

    /// Number of tiered months (the shortest row).
    pub fn tiered_months(&self) -> u32 {
        self.rows()
            .iter()
            .map(|(_, row)| row.len())
            .min()
            .and_then(|len| u32::try_from(len).ok())
            .unwrap_or(0)
    }

    /// Checks that every row is non-empty, rows share one length and rates
    /// are positive.
    pub fn validate(&self) -> Result<(), String> {
        let rows = self.rows();
        let expected = rows[0].1.len();

        for (name, row) in &rows {
            if row.is_empty() {
                return Err(format!("tier row '{}' must not be empty", name));
            }
            if row.len() != expected {
                return Err(format!(
                    "tier row '{}' has {} months, expected {}",
                    name,
                    row.len(),
                    expected
                ));
            }
            if let Some(rate) = row.iter().find(|r| **r <= Decimal::ZERO) {
                return Err(format!("tier row '{}' contains non-positive rate {}", name, rate));
            }
        }

        Ok(())
    }

    fn rows(&self) -> [(&'static str, &[Decimal]); 4] {
        [
            ("experienced.dine_in", &self.experienced.dine_in),
            ("experienced.express", &self.experienced.express),
            ("inexperienced.dine_in", &self.inexperienced.dine_in),
            ("inexperienced.express", &self.inexperienced.express),
        ]
    }
}

impl Default for SalaryMatrix {
    fn default() -> Self {
        let rp = |v: i64| Decimal::new(v, 0);
        Self {
            experienced: OutletRates {
                dine_in: vec![rp(2_000_000), rp(2_000_000), rp(1_750_000)],
                express: vec![rp(2_000_000), rp(1_750_000), rp(1_500_000)],
            },
            inexperienced: OutletRates {
                dine_in: vec![rp(1_750_000), rp(1_750_000), rp(1_500_000)],
                express: vec![rp(1_750_000), rp(1_500_000), rp(1_250_000)],
            },
        }
    }
}

/// Logistic model coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChurnCoefficients {
    /// Intercept.
    pub bias: f64,
    /// Weight per kilometre of commute.
    pub distance_weight: f64,
    /// Weight per month of tenure.
    pub tenure_weight: f64,
}

/// Score boundaries of the risk levels; both are exclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Scores above this are HIGH.
    pub high: u8,
    /// Scores above this (and not HIGH) are MEDIUM.
    pub medium: u8,
}

/// Thresholds of the contributing-factor rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorThresholds {
    /// Distance above which a commute is long.
    pub long_commute_km: f64,
    /// Tenure below which an employee is on probation.
    pub probation_months: i64,
    /// Distance above which a new employee counts as far.
    pub far_and_new_km: f64,
    /// Tenure below which a far employee counts as new.
    pub far_and_new_months: i64,
}

/// Sizes of the dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardLimits {
    /// Outlets listed on the heatmap.
    pub heatmap_outlets: usize,
    /// Employees listed on the top-risk list and its export.
    pub top_risks: usize,
}

/// The churn model from `churn_model.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChurnModel {
    /// Logistic coefficients.
    pub coefficients: ChurnCoefficients,
    /// Risk level boundaries.
    pub thresholds: RiskThresholds,
    /// Contributing factor rules.
    pub factors: FactorThresholds,
    /// Dashboard sizes.
    pub dashboard: DashboardLimits,
}

impl Default for ChurnModel {
    fn default() -> Self {
        Self {
            coefficients: ChurnCoefficients {
                bias: -2.0,
                distance_weight: 0.15,
                tenure_weight: -0.05,
            },
            thresholds: RiskThresholds {
                high: 75,
                medium: 40,
            },
            factors: FactorThresholds {
                long_commute_km: 15.0,
                probation_months: 3,
                far_and_new_km: 10.0,
                far_and_new_months: 6,
            },
            dashboard: DashboardLimits {
                heatmap_outlets: 3,
                top_risks: 5,
            },
        }
    }
}

/// Probation contract rules from `contracts.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRules {
    /// Length of a probation contract in months.
    pub probation_months: u32,
    /// Contract type tag written on probation contracts.
    pub contract_type: String,
    /// Leading segment of the contract number.
    pub number_prefix: String,
    /// Series segment of the contract number.
    pub number_series: String,
    /// Daily meal allowance written on the contract.
    pub daily_meal_allowance: Decimal,
    /// Outlet type used for outlets missing from the catalogue.
    pub default_outlet_type: OutletType,
    /// Outlet name to outlet type catalogue.
    #[serde(default)]
    pub outlets: HashMap<String, OutletType>,
}

impl ContractRules {
    /// The outlet type of a named outlet, falling back to the default.
    pub fn outlet_type_for(&self, outlet_name: &str) -> OutletType {
        self.outlets
            .get(outlet_name.trim())
            .copied()
            .unwrap_or(self.default_outlet_type)
    }
}

impl Default for ContractRules {
    fn default() -> Self {
        let outlets = [
            ("Buah Batu", OutletType::DineIn),
            ("Kota Baru Parahyangan", OutletType::DineIn),
            ("Ambon", OutletType::DineIn),
            ("Pajajaran", OutletType::DineIn),
            ("Cimahi Amir Machmud", OutletType::DineIn),
            ("Soreang", OutletType::Express),
            ("Cimahi Cihanjuang", OutletType::Express),
            ("Kiaracondong", OutletType::Express),
            ("Ujung Berung", OutletType::Express),
            ("Tubagus Ismail", OutletType::Express),
            ("Setrasari", OutletType::Express),
            ("Kopo", OutletType::Express),
        ]
        .into_iter()
        .map(|(name, kind)| (name.to_string(), kind))
        .collect();

        Self {
            probation_months: 3,
            contract_type: "PKWTTP".to_string(),
            number_prefix: "14".to_string(),
            number_series: "HRD-KKPTTP".to_string(),
            daily_meal_allowance: Decimal::new(10_000, 0),
            default_outlet_type: OutletType::Express,
            outlets,
        }
    }
}

/// The complete engine configuration.
///
/// This struct aggregates everything loaded from the YAML files in a
/// configuration directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    payroll: PayrollRules,
    salary_matrix: SalaryMatrix,
    churn: ChurnModel,
    contracts: ContractRules,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        payroll: PayrollRules,
        salary_matrix: SalaryMatrix,
        churn: ChurnModel,
        contracts: ContractRules,
    ) -> Self {
        Self {
            payroll,
            salary_matrix,
            churn,
            contracts,
        }
    }

    /// Returns the payroll rules.
    pub fn payroll(&self) -> &PayrollRules {
        &self.payroll
    }

    /// Returns the tenure salary matrix.
    pub fn salary_matrix(&self) -> &SalaryMatrix {
        &self.salary_matrix
    }

    /// Returns the churn model.
    pub fn churn(&self) -> &ChurnModel {
        &self.churn
    }

    /// Returns the contract rules.
    pub fn contracts(&self) -> &ContractRules {
        &self.contracts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_is_valid() {
        assert!(SalaryMatrix::default().validate().is_ok());
        assert_eq!(SalaryMatrix::default().tiered_months(), 3);
    }

    #[test]
    fn test_rate_month_zero_is_none() {
        let matrix = SalaryMatrix::default();
        assert_eq!(
            matrix.rate(ExperienceLevel::Inexperienced, OutletType::DineIn, 0),
            None
        );
    }

    #[test]
    fn test_rate_lookup_for_each_row() {
        let matrix = SalaryMatrix::default();
        assert_eq!(
            matrix.rate(ExperienceLevel::Experienced, OutletType::DineIn, 3),
            Some(Decimal::new(1_750_000, 0))
        );
        assert_eq!(
            matrix.rate(ExperienceLevel::Inexperienced, OutletType::Express, 3),
            Some(Decimal::new(1_250_000, 0))
        );
        assert_eq!(
            matrix.rate(ExperienceLevel::Inexperienced, OutletType::DineIn, 1),
            Some(Decimal::new(1_750_000, 0))
        );
    }

    #[test]
    fn test_validate_rejects_ragged_rows() {
        let mut matrix = SalaryMatrix::default();
        matrix.experienced.express.pop();

        let err = matrix.validate().unwrap_err();
        assert!(err.contains("experienced.express"));
    }

    #[test]
    fn test_validate_rejects_zero_rate() {
        let mut matrix = SalaryMatrix::default();
        matrix.inexperienced.dine_in[1] = Decimal::ZERO;
        assert!(matrix.validate().is_err());
    }

    #[test]
    fn test_outlet_catalogue_lookup() {
        let rules = ContractRules::default();
        assert_eq!(rules.outlet_type_for("Buah Batu"), OutletType::DineIn);
        assert_eq!(rules.outlet_type_for("Kopo"), OutletType::Express);
        assert_eq!(rules.outlet_type_for("Somewhere New"), OutletType::Express);
    }
}
