//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct, the [`Role`] enum used for
//! display precedence, and the [`Outlet`] reference every crew member is
//! assigned to.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The position an employee holds inside an outlet.
///
/// Roles carry no pay semantics; they only decide sort precedence on
/// attendance sheets and employee listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Baseline outlet crew.
    Crew,
    /// Shift leader.
    Leader,
    /// Outlet supervisor.
    Supervisor,
}

impl Role {
    /// Sort precedence, lowest first: supervisor, leader, crew.
    pub fn precedence(self) -> u8 {
        match self {
            Role::Supervisor => 1,
            Role::Leader => 2,
            Role::Crew => 3,
        }
    }

    /// Returns true for roles listed ahead of crew on attendance sheets.
    pub fn is_elevated(self) -> bool {
        matches!(self, Role::Leader | Role::Supervisor)
    }

    /// Lowercase label used in exports.
    pub fn label(self) -> &'static str {
        match self {
            Role::Crew => "crew",
            Role::Leader => "leader",
            Role::Supervisor => "supervisor",
        }
    }
}

/// A physical outlet an employee is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outlet {
    /// Identifier of the outlet in the store.
    pub id: String,
    /// Display name of the outlet (e.g., "Buah Batu").
    pub name: String,
}

/// Represents a crew member known to the HR store.
///
/// # Invariants
///
/// - `resign_date` is `None` whenever `is_active` is `true`.
/// - `distance_km`, when present, is not negative.
///
/// Both are checked by [`Employee::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name as registered.
    pub full_name: String,
    /// The employee's role inside the outlet.
    pub role: Role,
    /// Whether the employee is currently employed.
    pub is_active: bool,
    /// The date employment began; absent until onboarding is finalised.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// The resignation date; only set for inactive employees.
    #[serde(default)]
    pub resign_date: Option<NaiveDate>,
    /// The outlet the employee is assigned to.
    #[serde(default)]
    pub outlet: Option<Outlet>,
    /// Commute distance from home to outlet in kilometres.
    #[serde(default)]
    pub distance_km: Option<f64>,
    /// Bank name, stored verbatim.
    #[serde(default)]
    pub bank_name: Option<String>,
    /// Bank account number, stored verbatim.
    #[serde(default)]
    pub bank_account_number: Option<String>,
}

impl Employee {
    /// Checks the record invariants.
    ///
    /// # Example
    ///
    /// ```
    /// use hris_engine::models::{Employee, Role};
    ///
    /// let employee = Employee {
    ///     id: "crew_001".to_string(),
    ///     full_name: "Budi Santoso".to_string(),
    ///     role: Role::Crew,
    ///     is_active: true,
    ///     join_date: None,
    ///     resign_date: None,
    ///     outlet: None,
    ///     distance_km: Some(-1.0),
    ///     bank_name: None,
    ///     bank_account_number: None,
    /// };
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.is_active && self.resign_date.is_some() {
            return Err(EngineError::InvalidEmployee {
                field: "resign_date".to_string(),
                message: "must be empty while the employee is active".to_string(),
            });
        }

        if let Some(distance) = self.distance_km {
            if !distance.is_finite() || distance < 0.0 {
                return Err(EngineError::InvalidEmployee {
                    field: "distance_km".to_string(),
                    message: format!("must be a non-negative number, got {}", distance),
                });
            }
        }

        Ok(())
    }

    /// Commute distance used by the churn model: missing or invalid values
    /// count as zero.
    pub fn commute_distance_km(&self) -> f64 {
        self.distance_km
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(0.0)
    }

    /// The outlet display name, if the employee has been assigned one.
    pub fn outlet_name(&self) -> Option<&str> {
        self.outlet.as_ref().map(|o| o.name.as_str())
    }

    /// Human-readable length of service, e.g. "2 yrs 3 mos" or "5 mos".
    ///
    /// Service runs from the join date to the resignation date, or to
    /// `as_of` for employees who have not resigned. Returns `None` when the
    /// join date is unknown.
    ///
    /// # Example
    ///
    /// ```
    /// use hris_engine::models::{Employee, Role};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "crew_001".to_string(),
    ///     full_name: "Budi Santoso".to_string(),
    ///     role: Role::Crew,
    ///     is_active: true,
    ///     join_date: NaiveDate::from_ymd_opt(2023, 11, 1),
    ///     resign_date: None,
    ///     outlet: None,
    ///     distance_km: None,
    ///     bank_name: None,
    ///     bank_account_number: None,
    /// };
    /// let as_of = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
    /// assert_eq!(employee.work_duration(as_of).as_deref(), Some("2 yrs 3 mos"));
    /// ```
    pub fn work_duration(&self, as_of: NaiveDate) -> Option<String> {
        let start = self.join_date?;
        let end = self.resign_date.unwrap_or(as_of);

        let mut years = end.year() - start.year();
        let mut months = end.month() as i32 - start.month() as i32;
        if months < 0 {
            years -= 1;
            months += 12;
        }

        if years < 0 {
            return Some("0 mos".to_string());
        }
        if years > 0 {
            return Some(format!("{} yrs {} mos", years, months));
        }
        Some(format!("{} mos", months))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee {
            id: "crew_001".to_string(),
            full_name: "Budi Santoso".to_string(),
            role: Role::Crew,
            is_active: true,
            join_date: Some(date(2025, 6, 10)),
            resign_date: None,
            outlet: Some(Outlet {
                id: "outlet_bb".to_string(),
                name: "Buah Batu".to_string(),
            }),
            distance_km: Some(12.5),
            bank_name: Some("BCA".to_string()),
            bank_account_number: Some("1234567890".to_string()),
        }
    }

    #[test]
    fn test_deserialize_minimal_employee() {
        let json = r#"{
            "id": "crew_002",
            "full_name": "Siti Aminah",
            "role": "leader",
            "is_active": true
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.role, Role::Leader);
        assert!(employee.join_date.is_none());
        assert!(employee.outlet.is_none());
        assert!(employee.distance_km.is_none());
    }

    #[test]
    fn test_valid_employee_passes_validation() {
        assert!(create_test_employee().validate().is_ok());
    }

    #[test]
    fn test_active_employee_with_resign_date_is_invalid() {
        let mut employee = create_test_employee();
        employee.resign_date = Some(date(2025, 12, 1));

        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "resign_date"),
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_inactive_employee_may_have_resign_date() {
        let mut employee = create_test_employee();
        employee.is_active = false;
        employee.resign_date = Some(date(2025, 12, 1));
        assert!(employee.validate().is_ok());
    }

    #[test]
    fn test_negative_distance_is_invalid() {
        let mut employee = create_test_employee();
        employee.distance_km = Some(-3.0);

        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "distance_km"),
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_commute_distance_defaults_to_zero() {
        let mut employee = create_test_employee();
        employee.distance_km = None;
        assert_eq!(employee.commute_distance_km(), 0.0);

        employee.distance_km = Some(-4.0);
        assert_eq!(employee.commute_distance_km(), 0.0);

        employee.distance_km = Some(7.5);
        assert_eq!(employee.commute_distance_km(), 7.5);
    }

    #[test]
    fn test_role_precedence_orders_supervisor_first() {
        let mut roles = vec![Role::Crew, Role::Supervisor, Role::Leader];
        roles.sort_by_key(|r| r.precedence());
        assert_eq!(roles, vec![Role::Supervisor, Role::Leader, Role::Crew]);
    }

    #[test]
    fn test_role_is_elevated() {
        assert!(Role::Leader.is_elevated());
        assert!(Role::Supervisor.is_elevated());
        assert!(!Role::Crew.is_elevated());
    }

    #[test]
    fn test_work_duration_under_a_year() {
        let employee = create_test_employee();
        assert_eq!(
            employee.work_duration(date(2025, 11, 2)).as_deref(),
            Some("5 mos")
        );
    }

    #[test]
    fn test_work_duration_stops_at_resign_date() {
        let mut employee = create_test_employee();
        employee.is_active = false;
        employee.resign_date = Some(date(2026, 8, 15));
        assert_eq!(
            employee.work_duration(date(2030, 1, 1)).as_deref(),
            Some("1 yrs 2 mos")
        );
    }

    #[test]
    fn test_work_duration_without_join_date() {
        let mut employee = create_test_employee();
        employee.join_date = None;
        assert!(employee.work_duration(date(2026, 1, 1)).is_none());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&Role::Supervisor).unwrap(),
            "\"supervisor\""
        );
    }
}
