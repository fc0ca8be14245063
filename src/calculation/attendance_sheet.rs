//! Monthly attendance sheet.
//!
//! The sheet is the in-memory roster an admin edits before saving: one row
//! per active employee, pre-filled from saved summaries. Uploads overwrite
//! matched rows; nothing is persisted until the sheet is turned into
//! summaries with [`AttendanceSheet::to_summaries`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceCounts, AttendanceSummary, Employee, PayrollPeriod, Role};

use super::{NameMatcher, RosterRow};

/// Outlet name shown for employees without an outlet assignment.
pub const UNASSIGNED_OUTLET: &str = "Unassigned";

/// One employee's line on the attendance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    /// The employee.
    pub employee_id: String,
    /// The employee's full name.
    pub full_name: String,
    /// The employee's role, used for ordering.
    pub role: Role,
    /// Outlet display name, or [`UNASSIGNED_OUTLET`].
    pub outlet_name: String,
    /// Day counters.
    pub counts: AttendanceCounts,
    /// Whether a sick-leave document was provided.
    pub has_sick_letter: bool,
}

/// Rows of one outlet, as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutletGroup {
    /// Outlet display name.
    pub outlet_name: String,
    /// Rows, elevated roles first, then by name.
    pub rows: Vec<AttendanceRow>,
}

/// The result of applying an upload to a sheet.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// The updated sheet.
    pub sheet: AttendanceSheet,
    /// Employees whose counts were overwritten from the upload.
    pub matched: usize,
    /// Matched employees for whom more than one row qualified.
    pub ambiguous: usize,
}

/// The attendance roster for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSheet {
    period: PayrollPeriod,
    rows: Vec<AttendanceRow>,
}

impl AttendanceSheet {
    /// Builds the sheet for a period from the active employees.
    ///
    /// Counters come from the saved summary for the same employee and
    /// period when one exists, otherwise zero.
    pub fn for_period(
        employees: &[Employee],
        saved: &[AttendanceSummary],
        period: PayrollPeriod,
    ) -> Self {
        let saved: HashMap<&str, &AttendanceSummary> = saved
            .iter()
            .filter(|s| s.is_for(period))
            .map(|s| (s.employee_id.as_str(), s))
            .collect();

        let rows = employees
            .iter()
            .filter(|e| e.is_active)
            .map(|e| {
                let summary = saved.get(e.id.as_str());
                AttendanceRow {
                    employee_id: e.id.clone(),
                    full_name: e.full_name.clone(),
                    role: e.role,
                    outlet_name: e.outlet_name().unwrap_or(UNASSIGNED_OUTLET).to_string(),
                    counts: summary.map(|s| s.counts).unwrap_or_default(),
                    has_sick_letter: summary.is_some_and(|s| s.has_sick_letter),
                }
            })
            .collect();

        Self { period, rows }
    }

    /// The period this sheet covers.
    pub fn period(&self) -> PayrollPeriod {
        self.period
    }

    /// All rows, in roster order.
    pub fn rows(&self) -> &[AttendanceRow] {
        &self.rows
    }

    /// Overwrites counters of every employee the matcher finds in the
    /// upload. Unmatched employees keep their current counters.
    ///
    /// # Example
    ///
    /// ```
    /// use hris_engine::calculation::{AttendanceSheet, TwoTokenPrefixMatcher, parse_roster};
    /// use hris_engine::models::{Employee, PayrollPeriod, Role};
    ///
    /// let budi = Employee {
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
    /// let sheet = AttendanceSheet::for_period(&[budi], &[], period);
    ///
    /// let upload = parse_roster("BUDI SANTOSO JR;22;0;0;0;4;0;0;0");
    /// let outcome = sheet.apply_upload(&upload, &TwoTokenPrefixMatcher);
    /// assert_eq!(outcome.matched, 1);
    /// assert_eq!(outcome.sheet.rows()[0].counts.h, 22);
    /// ```
    pub fn apply_upload(&self, upload: &[RosterRow], matcher: &dyn NameMatcher) -> UploadOutcome {
        let mut matched = 0;
        let mut ambiguous = 0;

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let Some(found) = matcher.find(&row.full_name, upload) else {
                    return row.clone();
                };

                matched += 1;
                let candidates = matcher.count_matches(&row.full_name, upload);
                if candidates > 1 {
                    ambiguous += 1;
                    warn!(
                        employee_id = %row.employee_id,
                        candidates,
                        picked = %found.name,
                        "Ambiguous attendance match, using first row"
                    );
                }

                AttendanceRow {
                    counts: found.counts,
                    ..row.clone()
                }
            })
            .collect();

        debug!(
            period = %self.period,
            uploaded = upload.len(),
            matched,
            ambiguous,
            "Applied attendance upload"
        );

        UploadOutcome {
            sheet: Self {
                period: self.period,
                rows,
            },
            matched,
            ambiguous,
        }
    }

    /// Replaces one employee's counters by hand.
    pub fn with_counts(
        &self,
        employee_id: &str,
        counts: AttendanceCounts,
        has_sick_letter: bool,
    ) -> EngineResult<Self> {
        if !self.rows.iter().any(|r| r.employee_id == employee_id) {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }

        let rows = self
            .rows
            .iter()
            .map(|r| {
                if r.employee_id == employee_id {
                    AttendanceRow {
                        counts,
                        has_sick_letter,
                        ..r.clone()
                    }
                } else {
                    r.clone()
                }
            })
            .collect();

        Ok(Self {
            period: self.period,
            rows,
        })
    }

    /// Rows grouped by outlet for display.
    ///
    /// `search` filters case-insensitively on employee name or outlet name.
    /// Outlets are ordered A-Z; inside an outlet, leaders and supervisors
    /// come first, then everyone by name.
    pub fn grouped(&self, search: Option<&str>) -> Vec<OutletGroup> {
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut groups: Vec<OutletGroup> = Vec::new();
        for row in self.rows.iter().filter(|r| match &needle {
            Some(n) => {
                r.full_name.to_lowercase().contains(n) || r.outlet_name.to_lowercase().contains(n)
            }
            None => true,
        }) {
            match groups.iter_mut().find(|g| g.outlet_name == row.outlet_name) {
                Some(group) => group.rows.push(row.clone()),
                None => groups.push(OutletGroup {
                    outlet_name: row.outlet_name.clone(),
                    rows: vec![row.clone()],
                }),
            }
        }

        groups.sort_by(|a, b| a.outlet_name.cmp(&b.outlet_name));
        for group in &mut groups {
            group.rows.sort_by(|a, b| {
                b.role
                    .is_elevated()
                    .cmp(&a.role.is_elevated())
                    .then_with(|| a.full_name.cmp(&b.full_name))
            });
        }

        groups
    }

    /// The upsert payload: one summary per row, keyed by
    /// (employee, month, year).
    pub fn to_summaries(&self) -> Vec<AttendanceSummary> {
        self.rows
            .iter()
            .map(|r| AttendanceSummary {
                employee_id: r.employee_id.clone(),
                month: self.period.month,
                year: self.period.year,
                counts: r.counts,
                has_sick_letter: r.has_sick_letter,
            })
            .collect()
    }
}
