//! Identifier column detection and row extraction.

use serde::{Deserialize, Serialize};

use super::source::DataTable;
use crate::error::{Result, RetortError};

/// One input record: the identifiers supplied for a single chemical.
///
/// Immutable once extracted; validation writes its verdicts into a separate
/// [`crate::validation::ValidationRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// 1-based position in the source file (header excluded).
    pub row_number: usize,
    /// Chemical name, trimmed.
    pub name: Option<String>,
    /// Raw CAS value as supplied (normalization happens during validation).
    pub cas: Option<String>,
    /// SMILES string, trimmed.
    pub smiles: Option<String>,
}

/// Positions of the identifier columns in a parsed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    pub name: usize,
    pub cas: usize,
    pub smiles: Option<usize>,
}

impl ColumnRoles {
    /// Identify Name, CAS, and optionally SMILES columns by header.
    ///
    /// Matching is case-insensitive substring search: the first header
    /// containing `name`, the first containing `cas` (ignoring botanical
    /// `cassia` columns), and the first containing `smiles` (or exactly
    /// `smile`). Name and CAS are mandatory; a missing SMILES column means
    /// every row runs in retrieval mode.
    pub fn identify(headers: &[String]) -> Result<Self> {
        let mut name = None;
        let mut cas = None;
        let mut smiles = None;

        for (idx, header) in headers.iter().enumerate() {
            let lower = header.to_lowercase();
            if name.is_none() && lower.contains("name") {
                name = Some(idx);
            }
            if cas.is_none() && lower.contains("cas") && !lower.contains("cassia") {
                cas = Some(idx);
            }
            if smiles.is_none() && (lower.contains("smiles") || lower == "smile") {
                smiles = Some(idx);
            }
        }

        let name = name.ok_or_else(|| RetortError::MissingColumn("name".to_string()))?;
        let cas = cas.ok_or_else(|| RetortError::MissingColumn("cas".to_string()))?;

        Ok(Self { name, cas, smiles })
    }

    /// Extract rows from the table, skipping rows with no identifiers at all.
    ///
    /// `row_number` reflects the source position even when rows are skipped.
    pub fn extract(&self, table: &DataTable) -> Vec<Row> {
        let mut rows = Vec::new();

        for idx in 0..table.row_count() {
            let name = self.cell(table, idx, Some(self.name));
            let cas = self.cell(table, idx, Some(self.cas));
            let smiles = self.cell(table, idx, self.smiles);

            if name.is_none() && cas.is_none() && smiles.is_none() {
                continue;
            }

            rows.push(Row {
                row_number: idx + 1,
                name,
                cas,
                smiles,
            });
        }

        rows
    }

    fn cell(&self, table: &DataTable, row: usize, col: Option<usize>) -> Option<String> {
        let value = table.get(row, col?)?;
        if DataTable::is_missing_value(value) {
            None
        } else {
            Some(value.trim().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
            b',',
        )
    }

    #[test]
    fn identifies_columns_by_substring() {
        let t = table(&["Chemical Name", "CAS Number", "SMILES code"], &[]);
        let roles = ColumnRoles::identify(&t.headers).unwrap();
        assert_eq!(roles.name, 0);
        assert_eq!(roles.cas, 1);
        assert_eq!(roles.smiles, Some(2));
    }

    #[test]
    fn cassia_is_not_a_cas_column() {
        let t = table(&["Name", "Cassia content", "CAS"], &[]);
        let roles = ColumnRoles::identify(&t.headers).unwrap();
        assert_eq!(roles.cas, 2);
    }

    #[test]
    fn missing_smiles_column_is_allowed() {
        let t = table(&["Name", "CAS"], &[]);
        let roles = ColumnRoles::identify(&t.headers).unwrap();
        assert_eq!(roles.smiles, None);
    }

    #[test]
    fn missing_cas_column_is_fatal() {
        let t = table(&["Name", "SMILES"], &[]);
        assert!(matches!(
            ColumnRoles::identify(&t.headers),
            Err(RetortError::MissingColumn(_))
        ));
    }

    #[test]
    fn extract_skips_empty_rows_but_keeps_numbering() {
        let t = table(
            &["Name", "CAS", "SMILES"],
            &[
                &["acetone", "67-64-1", "CC(=O)C"],
                &["", "NA", "nan"],
                &["water", "7732-18-5", ""],
            ],
        );
        let roles = ColumnRoles::identify(&t.headers).unwrap();
        let rows = roles.extract(&t);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 1);
        assert_eq!(rows[1].row_number, 3);
        assert_eq!(rows[1].name.as_deref(), Some("water"));
        assert_eq!(rows[1].smiles, None);
    }
}
