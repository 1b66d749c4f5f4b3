use crate::utils::error::{Result, SyncError};
use std::fmt;

/// The cell block requested from the values API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRange {
    /// Every populated cell of the tab.
    WholeSheet,
    /// Inclusive A1-style bounds; columns and rows are 1-based.
    Bounded {
        first_column: u32,
        first_row: u32,
        last_column: u32,
        last_row: u32,
    },
}

impl Default for FetchRange {
    fn default() -> Self {
        FetchRange::Bounded {
            first_column: 1,
            first_row: 1,
            last_column: 26,
            last_row: 1000,
        }
    }
}

impl FetchRange {
    /// Parses `A1:Z1000` style notation.
    pub fn parse(notation: &str) -> Result<Self> {
        let invalid = |reason: &str| SyncError::InvalidConfigValueError {
            field: "sheet.range".to_string(),
            value: notation.to_string(),
            reason: reason.to_string(),
        };

        let (start, end) = notation
            .split_once(':')
            .ok_or_else(|| invalid("expected <start>:<end>, e.g. A1:Z1000"))?;
        let (first_column, first_row) =
            parse_cell(start.trim()).ok_or_else(|| invalid("invalid start cell"))?;
        let (last_column, last_row) =
            parse_cell(end.trim()).ok_or_else(|| invalid("invalid end cell"))?;

        if last_column < first_column || last_row < first_row {
            return Err(invalid("end cell must not precede start cell"));
        }

        Ok(FetchRange::Bounded {
            first_column,
            first_row,
            last_column,
            last_row,
        })
    }

    /// The `range` path segment: `Tab!A1:Z1000`, or just `Tab` for the whole sheet.
    pub fn qualified(&self, tab: &str) -> String {
        match self {
            FetchRange::WholeSheet => tab.to_string(),
            bounded => format!("{}!{}", tab, bounded),
        }
    }

    pub fn max_rows(&self) -> Option<usize> {
        match self {
            FetchRange::WholeSheet => None,
            FetchRange::Bounded {
                first_row,
                last_row,
                ..
            } => Some((last_row - first_row + 1) as usize),
        }
    }

    pub fn max_columns(&self) -> Option<usize> {
        match self {
            FetchRange::WholeSheet => None,
            FetchRange::Bounded {
                first_column,
                last_column,
                ..
            } => Some((last_column - first_column + 1) as usize),
        }
    }

    /// True when the returned block fills the bound in either direction, so rows or
    /// columns beyond it may have been cut off.
    pub fn is_saturated_by(&self, rows: &[Vec<String>]) -> bool {
        let rows_full = self.max_rows().is_some_and(|max| rows.len() >= max);
        let columns_full = self
            .max_columns()
            .is_some_and(|max| rows.iter().any(|row| row.len() >= max));
        rows_full || columns_full
    }
}

impl fmt::Display for FetchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchRange::WholeSheet => f.write_str("(whole sheet)"),
            FetchRange::Bounded {
                first_column,
                first_row,
                last_column,
                last_row,
            } => write!(
                f,
                "{}{}:{}{}",
                column_letters(*first_column),
                first_row,
                column_letters(*last_column),
                last_row
            ),
        }
    }
}

/// 1 -> A, 26 -> Z, 27 -> AA.
pub fn column_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push(b'A' + rem as u8);
        index = (index - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn parse_cell(cell: &str) -> Option<(u32, u32)> {
    let split = cell.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut column: u32 = 0;
    for c in letters.chars() {
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        column = column.checked_mul(26)?.checked_add(digit)?;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((column, row))
}
