//! Monthly attendance summary model.

use serde::{Deserialize, Serialize};

use super::PayrollPeriod;

/// Per-category day counters for one employee and month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCounts {
    /// Present (H).
    #[serde(default)]
    pub h: u32,
    /// Present but late (HT).
    #[serde(default)]
    pub ht: u32,
    /// Sick (S).
    #[serde(default)]
    pub s: u32,
    /// Permitted absence (I).
    #[serde(default)]
    pub i: u32,
    /// Unexcused absence (A).
    #[serde(default)]
    pub a: u32,
    /// Generic category (C).
    #[serde(default)]
    pub c: u32,
    /// Scheduled day off (OFF).
    #[serde(default)]
    pub off: u32,
    /// Saturday day off (OFF_SATURDAY).
    #[serde(default)]
    pub off_saturday: u32,
}

impl AttendanceCounts {
    /// Days credited toward salary: present plus present-late.
    ///
    /// # Example
    ///
    /// ```
    /// use hris_engine::models::AttendanceCounts;
    ///
    /// let counts = AttendanceCounts { h: 20, ht: 3, a: 2, ..Default::default() };
    /// assert_eq!(counts.work_days(), 23);
    /// ```
    pub fn work_days(&self) -> u32 {
        self.h.saturating_add(self.ht)
    }
}

/// The authoritative attendance record for one (employee, month, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee this summary belongs to.
    pub employee_id: String,
    /// Month of the summary (1-12).
    pub month: u32,
    /// Year of the summary.
    pub year: i32,
    /// Day counters.
    #[serde(flatten)]
    pub counts: AttendanceCounts,
    /// Whether a supporting sick-leave document was provided.
    #[serde(default)]
    pub has_sick_letter: bool,
}

impl AttendanceSummary {
    /// Returns true if this summary belongs to the given period.
    pub fn is_for(&self, period: PayrollPeriod) -> bool {
        self.month == period.month && self.year == period.year
    }

    /// The uniqueness key of a summary.
    pub fn key(&self) -> (String, u32, i32) {
        (self.employee_id.clone(), self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_days_counts_late_as_present() {
        let counts = AttendanceCounts {
            h: 22,
            ht: 2,
            s: 1,
            i: 1,
            a: 1,
            ..Default::default()
        };
        assert_eq!(counts.work_days(), 24);
    }

    #[test]
    fn test_deserialize_summary_with_flattened_counts() {
        let json = r#"{
            "employee_id": "crew_001",
            "month": 1,
            "year": 2026,
            "h": 20,
            "ht": 4,
            "a": 1
        }"#;

        let summary: AttendanceSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.counts.h, 20);
        assert_eq!(summary.counts.ht, 4);
        assert_eq!(summary.counts.off, 0);
        assert!(!summary.has_sick_letter);
    }

    #[test]
    fn test_is_for_period() {
        let summary = AttendanceSummary {
            employee_id: "crew_001".to_string(),
            month: 3,
            year: 2026,
            counts: AttendanceCounts::default(),
            has_sick_letter: false,
        };
        assert!(summary.is_for(PayrollPeriod::new(3, 2026).unwrap()));
        assert!(!summary.is_for(PayrollPeriod::new(3, 2025).unwrap()));
    }
}
