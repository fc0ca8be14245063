//! Read-only churn dashboard views over the latest prediction batch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ChurnModel;
use crate::models::{ChurnPrediction, Employee, RiskFactor, RiskLevel};

/// Outlet label for predictions whose employee has no outlet.
pub const UNKNOWN_OUTLET: &str = "Unknown Outlet";

/// Average risk of one outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutletRisk {
    /// Outlet display name.
    pub outlet_name: String,
    /// Rounded average score.
    pub average_score: u32,
    /// Predictions averaged.
    pub employee_count: usize,
}

/// One line of the top-risk list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskEntry {
    /// The employee.
    pub employee_id: String,
    /// Full name, or the id when the employee is unknown.
    pub full_name: String,
    /// Outlet display name.
    pub outlet_name: String,
    /// Role label.
    pub role: String,
    /// Risk score, 0-100.
    pub risk_score: u8,
    /// Risk level.
    pub risk_level: RiskLevel,
    /// Contributing factors.
    pub factors: Vec<RiskFactor>,
}

/// Dashboard aggregates of the most recent batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskOverview {
    /// The batch summarised; `None` before the first run.
    pub batch_id: Option<Uuid>,
    /// Active employees in the store.
    pub total_employees: usize,
    /// Average score to one decimal place.
    pub average_score: f64,
    /// Predictions at the HIGH level.
    pub high_risk_count: usize,
    /// Outlets by descending average score.
    pub heatmap: Vec<OutletRisk>,
    /// Highest scores first.
    pub top_risks: Vec<RiskEntry>,
}

/// Predictions of the most recently created batch.
pub fn latest_batch(predictions: &[ChurnPrediction]) -> Vec<&ChurnPrediction> {
    let Some(latest) = predictions.iter().max_by_key(|p| p.created_at) else {
        return Vec::new();
    };
    predictions
        .iter()
        .filter(|p| p.batch_id == latest.batch_id)
        .collect()
}

impl RiskOverview {
    /// Summarises the latest batch in `predictions`.
    pub fn build(
        employees: &[Employee],
        predictions: &[ChurnPrediction],
        model: &ChurnModel,
    ) -> Self {
        let by_id: HashMap<&str, &Employee> =
            employees.iter().map(|e| (e.id.as_str(), e)).collect();
        let latest = latest_batch(predictions);

        let average_score = if latest.is_empty() {
            0.0
        } else {
            let sum: u32 = latest.iter().map(|p| u32::from(p.risk_score)).sum();
            let mean = f64::from(sum) / latest.len() as f64;
            (mean * 10.0).round() / 10.0
        };

        let outlet_of = |p: &ChurnPrediction| -> String {
            by_id
                .get(p.employee_id.as_str())
                .and_then(|e| e.outlet_name())
                .unwrap_or(UNKNOWN_OUTLET)
                .to_string()
        };

        let mut groups: HashMap<String, (u32, usize)> = HashMap::new();
        for p in latest.iter().copied() {
            let entry = groups.entry(outlet_of(p)).or_default();
            entry.0 += u32::from(p.risk_score);
            entry.1 += 1;
        }
        let mut heatmap: Vec<OutletRisk> = groups
            .into_iter()
            .map(|(outlet_name, (sum, count))| OutletRisk {
                outlet_name,
                average_score: (f64::from(sum) / count as f64).round() as u32,
                employee_count: count,
            })
            .collect();
        heatmap.sort_by(|a, b| {
            b.average_score
                .cmp(&a.average_score)
                .then_with(|| a.outlet_name.cmp(&b.outlet_name))
        });
        heatmap.truncate(model.dashboard.heatmap_outlets);

        let mut ranked = latest.clone();
        ranked.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
        let top_risks = ranked
            .into_iter()
            .take(model.dashboard.top_risks)
            .map(|p| {
                let employee = by_id.get(p.employee_id.as_str());
                RiskEntry {
                    employee_id: p.employee_id.clone(),
                    full_name: employee
                        .map_or_else(|| p.employee_id.clone(), |e| e.full_name.clone()),
                    outlet_name: outlet_of(p),
                    role: employee.map_or("", |e| e.role.label()).to_string(),
                    risk_score: p.risk_score,
                    risk_level: p.risk_level,
                    factors: p.factors.clone(),
                }
            })
            .collect();

        Self {
            batch_id: latest.first().map(|p| p.batch_id),
            total_employees: employees.iter().filter(|e| e.is_active).count(),
            average_score,
            high_risk_count: latest
                .iter()
                .filter(|p| p.risk_level == RiskLevel::High)
                .count(),
            heatmap,
            top_risks,
        }
    }

    /// The top-risk list as CSV with a header row; text columns are quoted.
    ///
    /// # Example
    ///
    /// ```
    /// use hris_engine::calculation::RiskOverview;
    /// use hris_engine::config::ChurnModel;
    ///
    /// let overview = RiskOverview::build(&[], &[], &ChurnModel::default());
    /// assert_eq!(overview.to_csv(), "Name,Outlet,Role,Risk Score\n");
    /// ```
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("Name,Outlet,Role,Risk Score\n");
        for entry in &self.top_risks {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                quote(&entry.full_name),
                quote(&entry.outlet_name),
                quote(&entry.role),
                entry.risk_score
            ));
        }
        csv
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
