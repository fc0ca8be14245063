//! Monthly period model.
//!
//! Attendance summaries and payroll runs are both keyed by a calendar
//! month. [`PayrollPeriod`] validates the month once so calculators can
//! rely on it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month used as the key for attendance and payroll.
///
/// # Example
///
/// ```
/// use hris_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod::new(2, 2026).unwrap();
/// assert_eq!(
///     period.reference_date(25),
///     NaiveDate::from_ymd_opt(2026, 2, 25).unwrap()
/// );
/// assert_eq!(period.to_string(), "02/2026");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The year of the period.
    pub year: i32,
    /// The month of the period (1-12).
    pub month: u32,
}

impl PayrollPeriod {
    /// Creates a period, rejecting months outside 1-12.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidPeriod { month, year });
        }
        Ok(Self { year, month })
    }

    /// The date inside this month used as the tenure reference point.
    ///
    /// `day` is clamped to the last day of the month, so a configured
    /// reference day of 31 still resolves in February.
    pub fn reference_date(&self, day: u32) -> NaiveDate {
        let mut day = day.clamp(1, 31);
        loop {
            if let Some(date) = NaiveDate::from_ymd_opt(self.year, self.month, day) {
                return date;
            }
            day -= 1;
        }
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.reference_date(1)
    }
}

impl fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
