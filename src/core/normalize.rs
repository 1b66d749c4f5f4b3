use crate::config::DuplicateHeaderPolicy;
use crate::domain::model::{Record, RecordSet};
use crate::utils::error::{Result, SyncError};
use std::collections::HashMap;

/// Turns the raw grid into records keyed by the first row.
///
/// Short rows are padded with `""`, cells past the last header are dropped.
/// `rows` must contain at least the header row.
pub fn normalize_rows(rows: &[Vec<String>], policy: DuplicateHeaderPolicy) -> Result<RecordSet> {
    let Some((headers, data_rows)) = rows.split_first() else {
        return Ok(RecordSet::default());
    };

    // column name -> index of the header cell supplying its value
    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    let mut sources: Vec<usize> = Vec::with_capacity(headers.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (index, header) in headers.iter().enumerate() {
        match positions.get(header.as_str()) {
            Some(&position) => match policy {
                DuplicateHeaderPolicy::Reject => {
                    return Err(SyncError::DuplicateHeaderError {
                        header: header.clone(),
                    });
                }
                DuplicateHeaderPolicy::LastWins => {
                    tracing::warn!("Duplicate column '{}', keeping the rightmost value", header);
                    sources[position] = index;
                }
            },
            None => {
                positions.insert(header.as_str(), columns.len());
                columns.push(header.clone());
                sources.push(index);
            }
        }
    }

    let records = data_rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .zip(&sources)
                .map(|(column, &source)| {
                    let value = row.get(source).cloned().unwrap_or_default();
                    (column.clone(), value)
                })
                .collect::<Record>()
        })
        .collect();

    Ok(RecordSet::new(columns, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_ragged_rows_get_every_header_key() {
        let rows = grid(&[
            &["Company", "City", "Country"],
            &["Acme", "Aarhus", "DK"],
            &["Beta"],
            &["Gamma", "Oslo", "NO", "extra", "cells"],
        ]);

        let set = normalize_rows(&rows, DuplicateHeaderPolicy::Reject).unwrap();

        assert_eq!(set.len(), 3);
        for record in &set {
            assert_eq!(
                record.keys().collect::<Vec<_>>(),
                vec!["Company", "City", "Country"]
            );
        }
        assert_eq!(set.records()[1].get("City"), Some(""));
        assert_eq!(set.records()[1].get("Country"), Some(""));
        assert_eq!(set.records()[2].values().collect::<Vec<_>>(), vec!["Gamma", "Oslo", "NO"]);
    }

    #[test]
    fn test_header_only_is_empty_set() {
        let rows = grid(&[&["Company", "City"]]);
        let set = normalize_rows(&rows, DuplicateHeaderPolicy::Reject).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.columns(), ["Company", "City"]);
    }

    #[test]
    fn test_duplicate_header_rejected_by_default() {
        let rows = grid(&[&["Company", "City", "Company"], &["A", "B", "C"]]);
        let err = normalize_rows(&rows, DuplicateHeaderPolicy::Reject).unwrap_err();
        assert!(matches!(err, SyncError::DuplicateHeaderError { header } if header == "Company"));
    }

    #[test]
    fn test_duplicate_header_last_wins_keeps_first_position() {
        let rows = grid(&[&["Company", "City", "Company"], &["A", "B", "C"], &["D", "E"]]);
        let set = normalize_rows(&rows, DuplicateHeaderPolicy::LastWins).unwrap();

        assert_eq!(set.columns(), ["Company", "City"]);
        assert_eq!(set.records()[0].get("Company"), Some("C"));
        // the rightmost duplicate is missing in a short row
        assert_eq!(set.records()[1].get("Company"), Some(""));
    }
}
