//! Main Retort struct and public API.

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{ColumnRoles, Parser, ParserConfig, SourceMetadata};
use crate::pubchem::{
    CompoundProvider, Namespace, ProgressCallback, PubChemClient, Resolver, ResolverConfig,
};
use crate::validation::{duplicates, Checker, Status, ValidationRecord};

/// Configuration for a validation run.
#[derive(Debug, Clone)]
pub struct RetortConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Resolver pacing configuration.
    pub resolver: ResolverConfig,
    /// Probe connectivity with a known compound before processing rows.
    pub preflight: bool,
}

impl Default for RetortConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            resolver: ResolverConfig::default(),
            preflight: true,
        }
    }
}

/// Result of validating a data file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// One record per processed row, in input order.
    pub records: Vec<ValidationRecord>,
    /// Summary counts.
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Whether every processed row survived validation (stereo duplicates
    /// count as survivors; only rejections fail a run).
    pub fn all_validated(&self) -> bool {
        self.summary.rejected == 0
    }
}

/// Summary of a validation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_rows: usize,
    pub validated: usize,
    pub stereo_duplicates: usize,
    pub rejected: usize,
    pub exact_duplicate_groups: u32,
    pub stereo_duplicate_groups: u32,
}

/// The main validation engine.
///
/// Processing is sequential and single-threaded; the whole run can be moved
/// onto a background thread since the provider and callback are
/// `Send + Sync`.
pub struct Retort {
    config: RetortConfig,
    provider: Option<Arc<dyn CompoundProvider>>,
    progress: Option<ProgressCallback>,
}

impl Retort {
    /// Create a new instance with default configuration. PubChem is
    /// contacted lazily, on the first validation run.
    pub fn new() -> Self {
        Self::with_config(RetortConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: RetortConfig) -> Self {
        Self {
            config,
            provider: None,
            progress: None,
        }
    }

    /// Replace the compound provider (tests, offline runs, mirrors).
    pub fn with_provider(mut self, provider: impl CompoundProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Attach a progress callback for live status reporting.
    pub fn with_progress(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Validate a data file end to end.
    ///
    /// Parses the file, identifies identifier columns, validates every row
    /// against the provider, then classifies duplicates across the dataset.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<ValidationReport> {
        let path = path.as_ref();

        let parser = Parser::with_config(self.config.parser.clone());
        let (table, source) = parser.parse_file(path)?;
        info!("Read {} rows from {}", table.row_count(), source.file);

        let roles = ColumnRoles::identify(&table.headers)?;
        match roles.smiles {
            Some(_) => info!("SMILES column found: full validation available"),
            None => info!("No SMILES column: rows run in retrieval mode"),
        }

        let rows = roles.extract(&table);
        info!("Processing {} chemicals...", rows.len());

        let provider = match self.provider {
            Some(ref p) => Arc::clone(p),
            None => Arc::new(PubChemClient::new()?) as Arc<dyn CompoundProvider>,
        };

        let mut resolver = Resolver::new(provider, self.config.resolver.clone());
        if let Some(ref cb) = self.progress {
            resolver = resolver.with_progress(Arc::clone(cb));
        }

        if self.config.preflight {
            preflight(&resolver);
        }

        let checker = Checker::new(&resolver);
        let mut records: Vec<ValidationRecord> =
            rows.iter().map(|row| checker.validate_row(row)).collect();

        let counts = duplicates::classify(&mut records);
        let summary = summarize(&records, counts);

        info!(
            "Validation complete: {} validated, {} stereo duplicates, {} rejected",
            summary.validated, summary.stereo_duplicates, summary.rejected
        );
        resolver.report(&format!(
            "Validation complete: {} validated, {} stereo duplicates, {} rejected",
            summary.validated, summary.stereo_duplicates, summary.rejected
        ));

        Ok(ValidationReport {
            source,
            records,
            summary,
        })
    }
}

impl Default for Retort {
    fn default() -> Self {
        Self::new()
    }
}

/// Probe the lookup service with a compound that certainly exists.
///
/// Distinguishes "identifier not found" from "service unreachable" in the
/// logs; the outcome never aborts the run.
fn preflight(resolver: &Resolver) {
    let probe = resolver.resolve("water", Namespace::Name);
    if let Some(error) = probe.error {
        let message = format!(
            "Connectivity check failed; rows may be rejected for network reasons: {error}"
        );
        warn!("{message}");
        resolver.report(&message);
    }
}

fn summarize(
    records: &[ValidationRecord],
    counts: duplicates::DuplicateCounts,
) -> ValidationSummary {
    let mut summary = ValidationSummary {
        total_rows: records.len(),
        exact_duplicate_groups: counts.exact_groups,
        stereo_duplicate_groups: counts.stereo_groups,
        ..ValidationSummary::default()
    };

    for record in records {
        match record.status {
            Status::Validated => summary.validated += 1,
            Status::StereoDuplicate => summary.stereo_duplicates += 1,
            Status::Rejected => summary.rejected += 1,
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use tempfile::NamedTempFile;

    use super::*;
    use crate::pubchem::{LookupError, MockProvider};
    use crate::validation::RejectionReason;

    const ACETONE_KEY: &str = "CSCPPACGZOOCGX-UHFFFAOYSA-N";
    const ETHANOL_KEY: &str = "LFQSCWFLJHTTHZ-UHFFFAOYSA-N";

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn no_delay_retort(mock: MockProvider) -> Retort {
        Retort::with_config(RetortConfig {
            resolver: ResolverConfig::no_delay(),
            preflight: false,
            ..RetortConfig::default()
        })
        .with_provider(mock)
    }

    fn stocked_mock() -> MockProvider {
        MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "67-64-1", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Smiles, "CC(=O)C", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "ethanol", 702, ETHANOL_KEY, "CCO")
            .with_compound(Namespace::Name, "64-17-5", 702, ETHANOL_KEY, "CCO")
            .with_compound(Namespace::Smiles, "CCO", 702, ETHANOL_KEY, "CCO")
    }

    #[test]
    fn end_to_end_validates_and_counts() {
        let file = write_temp(
            "Name,CAS,SMILES\n\
             acetone,67-64-1,CC(=O)C\n\
             ethanol,64-17-5,CCO\n\
             unknown,50-00-0,C=O\n",
        );

        let report = no_delay_retort(stocked_mock())
            .validate_file(file.path())
            .unwrap();

        assert_eq!(report.summary.total_rows, 3);
        assert_eq!(report.summary.validated, 2);
        assert_eq!(report.summary.rejected, 1);
        assert!(!report.all_validated());

        assert_eq!(report.records[0].validated_cid, Some(180));
        assert_eq!(
            report.records[2].rejection_reason,
            Some(RejectionReason::IdentifierNotFound)
        );
    }

    #[test]
    fn end_to_end_exact_duplicate_demotion() {
        let file = write_temp(
            "Name,CAS,SMILES\n\
             acetone,67-64-1,CC(=O)C\n\
             2-propanone,67-64-1,CC(=O)C\n",
        );

        let mock = stocked_mock().with_compound(
            Namespace::Name,
            "2-propanone",
            180,
            ACETONE_KEY,
            "CC(=O)C",
        );

        let report = no_delay_retort(mock).validate_file(file.path()).unwrap();

        assert_eq!(report.summary.validated, 1);
        assert_eq!(report.summary.rejected, 1);
        assert_eq!(report.summary.exact_duplicate_groups, 1);

        let second = &report.records[1];
        assert_eq!(second.status, Status::Rejected);
        assert_eq!(second.rejection_reason, Some(RejectionReason::ExactDuplicate));
        assert_eq!(second.exact_duplicate_group, Some(1));
        assert_eq!(report.records[0].exact_duplicate_group, Some(1));
    }

    #[test]
    fn end_to_end_retrieval_mode() {
        let file = write_temp("Name,CAS\nacetone,67-64-1\n");
        let mock = stocked_mock().with_smiles(180, "CC(=O)C");

        let report = no_delay_retort(mock).validate_file(file.path()).unwrap();

        assert_eq!(report.summary.validated, 1);
        let record = &report.records[0];
        assert_eq!(record.smiles.as_deref(), Some("CC(=O)C"));
        assert_eq!(
            record.smiles_source,
            Some(crate::validation::SmilesSource::Pubchem)
        );
    }

    #[test]
    fn progress_callback_reports_rows_and_summary() {
        let file = write_temp("Name,CAS,SMILES\nacetone,67-64-1,CC(=O)C\n");
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        no_delay_retort(stocked_mock())
            .with_progress(move |msg: &str| sink.lock().unwrap().push(msg.to_string()))
            .validate_file(file.path())
            .unwrap();

        let messages = seen.lock().unwrap();
        assert!(messages.iter().any(|m| m.starts_with("Row 1:")));
        assert!(messages.iter().any(|m| m.starts_with("Validation complete")));
    }

    #[test]
    fn preflight_failure_warns_but_never_aborts() {
        let file = write_temp("Name,CAS,SMILES\nacetone,67-64-1,CC(=O)C\n");
        let mock = stocked_mock().with_failure(
            Namespace::Name,
            "water",
            LookupError::Transport("connection refused".to_string()),
        );

        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let report = Retort::with_config(RetortConfig {
            resolver: ResolverConfig::no_delay(),
            preflight: true,
            ..RetortConfig::default()
        })
        .with_provider(mock)
        .with_progress(move |msg: &str| sink.lock().unwrap().push(msg.to_string()))
        .validate_file(file.path())
        .unwrap();

        assert_eq!(report.summary.validated, 1);
        let messages = seen.lock().unwrap();
        assert!(messages
            .iter()
            .any(|m| m.starts_with("Connectivity check failed")));
    }

    #[test]
    fn missing_cas_column_fails_fast() {
        let file = write_temp("Name,SMILES\nacetone,CC(=O)C\n");
        let result = no_delay_retort(MockProvider::new()).validate_file(file.path());
        assert!(matches!(
            result,
            Err(crate::error::RetortError::MissingColumn(_))
        ));
    }
}
