//! Matching uploaded roster rows to known employees.
//!
//! Uploads carry names only, so reconciliation is a string heuristic. The
//! [`NameMatcher`] trait isolates that heuristic from the aggregation in
//! [`AttendanceSheet`](super::AttendanceSheet).

use super::RosterRow;

/// Decides whether an uploaded row belongs to an employee.
pub trait NameMatcher: Send + Sync {
    /// Returns true if `row_name` refers to the employee named `employee_name`.
    fn is_match(&self, employee_name: &str, row_name: &str) -> bool;

    /// The first row in upload order that matches the employee.
    fn find<'a>(&self, employee_name: &str, rows: &'a [RosterRow]) -> Option<&'a RosterRow> {
        rows.iter().find(|row| self.is_match(employee_name, &row.name))
    }

    /// How many rows match the employee; more than one means the first
    /// match was picked arbitrarily.
    fn count_matches(&self, employee_name: &str, rows: &[RosterRow]) -> usize {
        rows.iter()
            .filter(|row| self.is_match(employee_name, &row.name))
            .count()
    }
}

/// Matches when the row name contains the employee's first two name tokens,
/// case-insensitively.
///
/// "Budi Santoso" matches "BUDI SANTOSO JR" and "Pak Budi Santoso", but
/// also every other "Budi Santoso ..." in the upload.
///
/// # Example
///
/// ```
/// use hris_engine::calculation::{NameMatcher, TwoTokenPrefixMatcher};
///
/// let matcher = TwoTokenPrefixMatcher;
/// assert!(matcher.is_match("Budi Santoso Wijaya", "BUDI SANTOSO JR"));
/// assert!(!matcher.is_match("Budi Santoso", "Budi S."));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoTokenPrefixMatcher;

impl TwoTokenPrefixMatcher {
    fn key(employee_name: &str) -> String {
        employee_name
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl NameMatcher for TwoTokenPrefixMatcher {
    fn is_match(&self, employee_name: &str, row_name: &str) -> bool {
        let key = Self::key(employee_name);
        if key.is_empty() {
            return false;
        }
        row_name.to_lowercase().contains(&key)
    }
}

/// Matches only when both names are equal after trimming, collapsing
/// whitespace and lowercasing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactNameMatcher;

impl ExactNameMatcher {
    fn normalise(name: &str) -> String {
        name.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl NameMatcher for ExactNameMatcher {
    fn is_match(&self, employee_name: &str, row_name: &str) -> bool {
        let employee = Self::normalise(employee_name);
        !employee.is_empty() && employee == Self::normalise(row_name)
    }
}
