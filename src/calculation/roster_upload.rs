//! Attendance upload parsing.
//!
//! Uploads are semicolon-delimited text without a header row. Each line is
//! `name;H;HT;S;I;OFF;A;C;OFF_SATURDAY`; trailing columns may be omitted.
//! Malformed cells never fail the upload: they read as zero.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::AttendanceCounts;

/// Column delimiter of the upload format.
pub const UPLOAD_DELIMITER: char = ';';

/// One parsed line of an attendance upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    /// The name exactly as written in the first column.
    pub name: String,
    /// Counters from columns 2-9.
    pub counts: AttendanceCounts,
}

/// Parses upload text into roster rows, in upload order.
///
/// Blank lines and lines with an empty name column are skipped.
///
/// # Example
///
/// ```
/// use hris_engine::calculation::parse_roster;
///
/// let rows = parse_roster("BUDI SANTOSO JR;22;0;1;0;4;1;0;2\n\nSiti;x");
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].counts.h, 22);
/// assert_eq!(rows[0].counts.off, 4);
/// assert_eq!(rows[0].counts.a, 1);
/// assert_eq!(rows[1].counts.h, 0);
/// ```
pub fn parse_roster(text: &str) -> Vec<RosterRow> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| {
            let fields = split_fields(line);
            let name = fields.first().map(|f| f.trim()).unwrap_or_default();
            if name.is_empty() {
                debug!(line = index + 1, "Skipping upload line without a name");
                return None;
            }

            let cell = |column: usize| fields.get(column).map_or(0, |f| parse_count(f));
            Some(RosterRow {
                name: name.to_string(),
                counts: AttendanceCounts {
                    h: cell(1),
                    ht: cell(2),
                    s: cell(3),
                    i: cell(4),
                    off: cell(5),
                    a: cell(6),
                    c: cell(7),
                    off_saturday: cell(8),
                },
            })
        })
        .collect()
}

/// Splits a line on the delimiter, honouring double-quoted fields.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            UPLOAD_DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

/// Reads a counter cell; anything that is not a non-negative number is 0.
fn parse_count(cell: &str) -> u32 {
    let cell = cell.trim();
    if let Ok(value) = cell.parse::<u32>() {
        return value;
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) => {
            value.trunc() as u32
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_row() {
        let rows = parse_roster("Budi Santoso;20;2;1;1;4;1;0;3");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Budi Santoso");
        assert_eq!(
            rows[0].counts,
            AttendanceCounts {
                h: 20,
                ht: 2,
                s: 1,
                i: 1,
                off: 4,
                a: 1,
                c: 0,
                off_saturday: 3,
            }
        );
    }

    #[test]
    fn test_missing_trailing_columns_are_zero() {
        let rows = parse_roster("Budi Santoso;22");
        assert_eq!(rows[0].counts.h, 22);
        assert_eq!(rows[0].counts.off_saturday, 0);
    }

    #[test]
    fn test_non_numeric_cells_are_zero() {
        let rows = parse_roster("Budi Santoso;abc;-3;;2.7;NaN");
        let counts = rows[0].counts;

        assert_eq!(counts.h, 0);
        assert_eq!(counts.ht, 0);
        assert_eq!(counts.s, 0);
        assert_eq!(counts.i, 2);
        assert_eq!(counts.off, 0);
    }

    #[test]
    fn test_blank_and_nameless_lines_are_skipped() {
        let rows = parse_roster("\r\nBudi;1\r\n   \r\n;5;5\r\nSiti;2\r\n");
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Budi", "Siti"]);
    }

    #[test]
    fn test_quoted_name_may_contain_delimiter() {
        let rows = parse_roster("\"Santoso; Budi\";7;1");
        assert_eq!(rows[0].name, "Santoso; Budi");
        assert_eq!(rows[0].counts.h, 7);
        assert_eq!(rows[0].counts.ht, 1);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let rows = parse_roster("\u{feff}Budi;3");
        assert_eq!(rows[0].name, "Budi");
    }

    #[test]
    fn test_cells_are_trimmed() {
        let rows = parse_roster("  Budi Santoso ; 12 ; 3 ");
        assert_eq!(rows[0].name, "Budi Santoso");
        assert_eq!(rows[0].counts.h, 12);
        assert_eq!(rows[0].counts.ht, 3);
    }
}
