//! Churn risk scoring.
//!
//! A fixed-coefficient logistic model over commute distance and tenure:
//!
//! ```text
//! z     = bias + distance_weight * km + tenure_weight * months
//! p     = 1 / (1 + e^-z)
//! score = round(p * 100)
//! ```

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::config::{ChurnModel, RiskThresholds};
use crate::models::{ChurnPrediction, Employee, RiskFactor, RiskLevel};

/// The outcome of scoring one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct ChurnScore {
    /// The linear predictor.
    pub z: f64,
    /// Probability of leaving, 0-1.
    pub probability: f64,
    /// Rounded score, 0-100.
    pub risk_score: u8,
    /// Categorical level.
    pub risk_level: RiskLevel,
    /// Contributing factors, in rule order.
    pub factors: Vec<RiskFactor>,
}

/// Whole months between the join month and `as_of`, never negative.
///
/// A missing join date counts as joining today, so tenure is 0.
pub fn tenure_months(join_date: Option<NaiveDate>, as_of: NaiveDate) -> i64 {
    let Some(join) = join_date else {
        return 0;
    };
    let months = i64::from(as_of.year() - join.year()) * 12 + i64::from(as_of.month())
        - i64::from(join.month());
    months.max(0)
}

/// Maps a score to its risk level; both thresholds are exclusive.
pub fn risk_level(score: u8, thresholds: &RiskThresholds) -> RiskLevel {
    if score > thresholds.high {
        RiskLevel::High
    } else if score > thresholds.medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Scores one commute distance and tenure.
///
/// Negative or non-finite distances count as 0 km; negative tenure counts
/// as 0 months.
///
/// # Example
///
/// ```
/// use hris_engine::calculation::score;
/// use hris_engine::config::ChurnModel;
/// use hris_engine::models::{RiskFactor, RiskLevel};
///
/// let result = score(20.0, 1, &ChurnModel::default());
/// assert_eq!(result.risk_score, 72);
/// assert_eq!(result.risk_level, RiskLevel::Medium);
/// assert!(result.factors.contains(&RiskFactor::LongCommute));
/// assert!(result.factors.contains(&RiskFactor::ProbationPeriod));
/// ```
pub fn score(distance_km: f64, tenure_months: i64, model: &ChurnModel) -> ChurnScore {
    let distance = if distance_km.is_finite() && distance_km > 0.0 {
        distance_km
    } else {
        0.0
    };
    let tenure = tenure_months.max(0);
    let c = &model.coefficients;

    let z = c.bias + c.distance_weight * distance + c.tenure_weight * tenure as f64;
    let probability = 1.0 / (1.0 + (-z).exp());
    let risk_score = (probability * 100.0).round().clamp(0.0, 100.0) as u8;

    let f = &model.factors;
    let mut factors = Vec::new();
    if distance > f.long_commute_km {
        factors.push(RiskFactor::LongCommute);
    }
    if tenure < f.probation_months {
        factors.push(RiskFactor::ProbationPeriod);
    }
    if distance > f.far_and_new_km && tenure < f.far_and_new_months {
        factors.push(RiskFactor::FarAndNew);
    }

    ChurnScore {
        z,
        probability,
        risk_score,
        risk_level: risk_level(risk_score, &model.thresholds),
        factors,
    }
}

/// Scores every active employee as one batch.
///
/// Every prediction shares one batch id and the run timestamp; earlier
/// predictions are never updated.
pub fn predict_batch(
    employees: &[Employee],
    model: &ChurnModel,
    run_at: DateTime<Utc>,
) -> Vec<ChurnPrediction> {
    let batch_id = Uuid::new_v4();
    let today = run_at.date_naive();

    let predictions: Vec<ChurnPrediction> = employees
        .iter()
        .filter(|e| e.is_active)
        .map(|e| {
            let result = score(
                e.commute_distance_km(),
                tenure_months(e.join_date, today),
                model,
            );
            ChurnPrediction {
                id: Uuid::new_v4(),
                batch_id,
                employee_id: e.id.clone(),
                risk_score: result.risk_score,
                risk_level: result.risk_level,
                factors: result.factors,
                created_at: run_at,
            }
        })
        .collect();

    debug!(batch_id = %batch_id, predictions = predictions.len(), "Scored churn batch");
    predictions
}
