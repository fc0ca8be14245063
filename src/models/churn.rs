//! Churn prediction models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categorical bucket of a churn risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Score at or below the medium threshold.
    Low,
    /// Score above the medium threshold, at or below the high threshold.
    Medium,
    /// Score above the high threshold.
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// A reason that contributed to an employee's risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFactor {
    /// Commute distance above the long-commute threshold.
    #[serde(rename = "long commute")]
    LongCommute,
    /// Tenure still inside the probation window.
    #[serde(rename = "probation period")]
    ProbationPeriod,
    /// Both fairly far away and fairly new.
    #[serde(rename = "compounded risk: far and new")]
    FarAndNew,
}

impl RiskFactor {
    /// The label stored with a prediction.
    pub fn label(self) -> &'static str {
        match self {
            RiskFactor::LongCommute => "long commute",
            RiskFactor::ProbationPeriod => "probation period",
            RiskFactor::FarAndNew => "compounded risk: far and new",
        }
    }
}

/// One churn prediction for one employee, produced by a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnPrediction {
    /// Unique identifier of the prediction.
    pub id: Uuid,
    /// Identifier shared by every prediction of the same run.
    pub batch_id: Uuid,
    /// The employee the prediction is about.
    pub employee_id: String,
    /// Risk score, 0-100.
    pub risk_score: u8,
    /// Categorical risk level.
    pub risk_level: RiskLevel,
    /// Contributing factors, in rule order.
    pub factors: Vec<RiskFactor>,
    /// When the batch ran.
    pub created_at: DateTime<Utc>,
}
