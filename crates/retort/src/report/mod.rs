//! Results table output.
//!
//! One output row per processed input row, in a fixed column order so
//! downstream spreadsheets line up run after run.

use std::path::{Path, PathBuf};

use crate::error::{Result, RetortError};
use crate::retort::ValidationReport;
use crate::validation::ValidationRecord;

/// Column order of the results table.
pub const COLUMNS: [&str; 19] = [
    "row_number",
    "name",
    "cas",
    "smiles",
    "smiles_source",
    "cid_by_name",
    "cid_by_cas",
    "cid_by_smiles",
    "inchikey_by_name",
    "inchikey_by_cas",
    "inchikey_by_smiles",
    "validated_cid",
    "validated_inchikey",
    "validated_inchikey14",
    "status",
    "rejection_reason",
    "lookup_error",
    "exact_duplicate_group",
    "stereo_duplicate_group",
];

/// Default output path next to the input: `<stem>.validation.csv`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    input.with_file_name(format!("{stem}.validation.csv"))
}

/// Write the results table as CSV.
pub fn write_csv(report: &ValidationReport, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(COLUMNS)?;
    for record in &report.records {
        writer.write_record(record_fields(record))?;
    }
    writer.flush().map_err(|e| RetortError::Io {
        path: path.as_ref().to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Write the full report (source metadata included) as JSON.
pub fn write_json(report: &ValidationReport, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path.as_ref(), json).map_err(|e| RetortError::Io {
        path: path.as_ref().to_path_buf(),
        source: e,
    })
}

fn record_fields(record: &ValidationRecord) -> Vec<String> {
    vec![
        record.row_number.to_string(),
        opt_str(record.name.as_deref()),
        opt_str(record.cas.as_deref()),
        opt_str(record.smiles.as_deref()),
        opt_str(record.smiles_source.map(|s| match s {
            crate::validation::SmilesSource::Input => "input",
            crate::validation::SmilesSource::Pubchem => "pubchem",
        })),
        opt_num(record.cid_by_name),
        opt_num(record.cid_by_cas),
        opt_num(record.cid_by_smiles),
        opt_str(record.inchikey_by_name.as_deref()),
        opt_str(record.inchikey_by_cas.as_deref()),
        opt_str(record.inchikey_by_smiles.as_deref()),
        opt_num(record.validated_cid),
        opt_str(record.validated_inchikey.as_deref()),
        opt_str(record.validated_inchikey14.as_deref()),
        record.status.label().to_string(),
        opt_str(record.rejection_reason.map(|r| r.label())),
        opt_str(record.lookup_error.as_deref()),
        opt_num(record.exact_duplicate_group),
        opt_num(record.stereo_duplicate_group),
    ]
}

fn opt_str(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn opt_num<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
