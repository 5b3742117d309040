//! Per-row consistency checking.
//!
//! Each row moves through a small state machine: determine the mode from
//! which identifiers are present, resolve each required identifier, then
//! compare the resolved CIDs. Exact-duplicate detection is deferred to the
//! whole-dataset pass in [`super::duplicates`].

use log::info;

use crate::chem::{cas, inchikey};
use crate::input::Row;
use crate::pubchem::{Namespace, Resolution, Resolver};

use super::record::{RejectionReason, SmilesSource, Status, ValidationMode, ValidationRecord};

/// Validates one row at a time against a resolver.
pub struct Checker<'a> {
    resolver: &'a Resolver,
}

impl<'a> Checker<'a> {
    /// Create a checker over a resolver.
    pub fn new(resolver: &'a Resolver) -> Self {
        Self { resolver }
    }

    /// Validate a single row's identifiers.
    ///
    /// Never fails: every outcome, including lookup errors, lands in the
    /// returned record's status and rejection reason.
    pub fn validate_row(&self, row: &Row) -> ValidationRecord {
        let display = row.name.as_deref().unwrap_or("<unnamed>");
        self.resolver.report(&format!("Row {}: {display}", row.row_number));
        info!("Row {}: {display}", row.row_number);

        let mut record = ValidationRecord::from_row(row);
        let mut errors: Vec<String> = Vec::new();

        let Some(mode) = ValidationMode::for_row(row) else {
            record.reject(RejectionReason::InsufficientIdentifiers);
            return record;
        };

        // Normalize the CAS; the record carries the normalized form.
        let cas_normalized = row.cas.as_deref().and_then(cas::normalize_cas);
        if let Some(ref normalized) = cas_normalized {
            record.cas = Some(normalized.clone());
            if !cas::is_valid_cas(normalized) {
                record.reject(RejectionReason::InvalidCas);
                return record;
            }
        }

        // Name and CAS are required in both modes.
        let name = row.name.as_deref().unwrap_or_default();
        let by_name = self.resolver.resolve(name, Namespace::Name);
        if let Some(ref e) = by_name.error {
            errors.push(format!("name={e}"));
        }
        record.cid_by_name = by_name.cid;
        record.inchikey_by_name = by_name.inchikey.clone();

        let by_cas = match cas_normalized {
            Some(ref normalized) => self.resolver.resolve_cas(normalized),
            None => Resolution::default(),
        };
        if let Some(ref e) = by_cas.error {
            errors.push(format!("cas={e}"));
        }
        record.cid_by_cas = by_cas.cid;
        record.inchikey_by_cas = by_cas.inchikey.clone();

        let smiles = match mode {
            ValidationMode::Full => match row.smiles.clone() {
                Some(s) => s,
                // Unreachable: Full mode implies a supplied SMILES.
                None => {
                    record.reject(RejectionReason::InsufficientIdentifiers);
                    return record;
                }
            },
            ValidationMode::Retrieval => {
                match (by_name.cid, by_cas.cid) {
                    (Some(a), Some(b)) if a == b => {
                        let (retrieved, err) = self.resolver.smiles_for_cid(a);
                        if let Some(e) = err {
                            errors.push(format!("cid={e}"));
                        }
                        match retrieved {
                            Some(s) => {
                                record.smiles = Some(s.clone());
                                record.smiles_source = Some(SmilesSource::Pubchem);
                                s
                            }
                            None => {
                                record.reject(RejectionReason::ComplexChemicalNoSmiles);
                                record.note_errors(&errors);
                                return record;
                            }
                        }
                    }
                    (Some(_), Some(_)) => {
                        record.reject(RejectionReason::PubchemDiscordance);
                        record.note_errors(&errors);
                        return record;
                    }
                    _ => {
                        record.reject(RejectionReason::IdentifierNotFound);
                        record.note_errors(&errors);
                        return record;
                    }
                }
            }
        };

        let by_smiles = self.resolver.resolve(&smiles, Namespace::Smiles);
        if by_smiles.is_bad_input() {
            if let Some(ref e) = by_smiles.error {
                errors.push(format!("smiles={e}"));
            }
            record.reject(RejectionReason::InvalidSmiles);
            record.note_errors(&errors);
            return record;
        }
        if let Some(ref e) = by_smiles.error {
            errors.push(format!("smiles={e}"));
        }
        record.cid_by_smiles = by_smiles.cid;
        record.inchikey_by_smiles = by_smiles.inchikey.clone();

        self.classify(&mut record, &errors);
        record.note_errors(&errors);
        record
    }

    /// Compare the resolved CIDs and settle the row's status.
    fn classify(&self, record: &mut ValidationRecord, errors: &[String]) {
        let found: Vec<u64> = [record.cid_by_name, record.cid_by_cas, record.cid_by_smiles]
            .into_iter()
            .flatten()
            .collect();

        match found.len() {
            3 => {
                if found[0] == found[1] && found[1] == found[2] {
                    record.status = Status::Validated;
                    record.validated_cid = Some(found[0]);

                    let key = record
                        .inchikey_by_name
                        .clone()
                        .or_else(|| record.inchikey_by_cas.clone())
                        .or_else(|| record.inchikey_by_smiles.clone());
                    record.validated_inchikey14 = key
                        .as_deref()
                        .and_then(inchikey::connectivity_prefix)
                        .map(str::to_string);
                    record.validated_inchikey = key;
                } else {
                    record.reject(RejectionReason::PubchemDiscordance);
                }
            }
            2 => {
                if found[0] == found[1] {
                    record.reject(RejectionReason::IdentifierNotFound);
                } else {
                    record.reject(RejectionReason::IdentifierNotFoundAndPubchemDiscordance);
                }
            }
            _ => {
                if errors.is_empty() {
                    record.reject(RejectionReason::IdentifierNotFound);
                } else {
                    record.reject(RejectionReason::PubchemQueryFailed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pubchem::{CompoundProvider, LookupError, MockProvider, ResolverConfig};

    const ACETONE_KEY: &str = "CSCPPACGZOOCGX-UHFFFAOYSA-N";

    fn row(name: Option<&str>, cas: Option<&str>, smiles: Option<&str>) -> Row {
        Row {
            row_number: 1,
            name: name.map(str::to_string),
            cas: cas.map(str::to_string),
            smiles: smiles.map(str::to_string),
        }
    }

    fn check(mock: MockProvider, row: &Row) -> (ValidationRecord, usize) {
        let mock = Arc::new(mock);
        let resolver = Resolver::new(
            Arc::clone(&mock) as Arc<dyn CompoundProvider>,
            ResolverConfig::no_delay(),
        );
        let record = Checker::new(&resolver).validate_row(row);
        (record, mock.call_count())
    }

    fn acetone_mock() -> MockProvider {
        MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "67-64-1", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Smiles, "CC(=O)C", 180, ACETONE_KEY, "CC(=O)C")
    }

    #[test]
    fn full_mode_agreement_validates() {
        let input = row(Some("acetone"), Some("67-64-1"), Some("CC(=O)C"));
        let (record, _) = check(acetone_mock(), &input);

        assert_eq!(record.status, Status::Validated);
        assert_eq!(record.validated_cid, Some(180));
        assert_eq!(record.validated_inchikey.as_deref(), Some(ACETONE_KEY));
        assert_eq!(
            record.validated_inchikey14.as_deref(),
            Some("CSCPPACGZOOCGX")
        );
        assert_eq!(record.smiles_source, Some(SmilesSource::Input));
        assert_eq!(record.rejection_reason, None);
    }

    #[test]
    fn discordant_cids_reject() {
        let mock = MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "64-17-5", 702, "LFQSCWFLJHTTHZ-UHFFFAOYSA-N", "CCO")
            .with_compound(Namespace::Smiles, "CC(=O)C", 180, ACETONE_KEY, "CC(=O)C");

        let input = row(Some("acetone"), Some("64-17-5"), Some("CC(=O)C"));
        let (record, _) = check(mock, &input);

        assert_eq!(record.status, Status::Rejected);
        assert_eq!(
            record.rejection_reason,
            Some(RejectionReason::PubchemDiscordance)
        );
    }

    #[test]
    fn retrieval_mode_fetches_smiles() {
        let mock = MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "67-64-1", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Smiles, "CC(=O)C", 180, ACETONE_KEY, "CC(=O)C")
            .with_smiles(180, "CC(=O)C");

        let input = row(Some("acetone"), Some("67-64-1"), None);
        let (record, _) = check(mock, &input);

        assert_eq!(record.status, Status::Validated);
        assert_eq!(record.smiles.as_deref(), Some("CC(=O)C"));
        assert_eq!(record.smiles_source, Some(SmilesSource::Pubchem));
        assert_eq!(record.cid_by_smiles, Some(180));
    }

    #[test]
    fn retrieval_mode_without_smiles_rejects_complex_chemical() {
        // CID 180 resolvable by name and CAS, but no SMILES registered.
        let mock = MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "67-64-1", 180, ACETONE_KEY, "CC(=O)C");

        let input = row(Some("acetone"), Some("67-64-1"), None);
        let (record, _) = check(mock, &input);

        assert_eq!(record.status, Status::Rejected);
        assert_eq!(
            record.rejection_reason,
            Some(RejectionReason::ComplexChemicalNoSmiles)
        );
    }

    #[test]
    fn retrieval_mode_discordance_rejects_before_fetch() {
        let mock = MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "64-17-5", 702, "LFQSCWFLJHTTHZ-UHFFFAOYSA-N", "CCO");

        let input = row(Some("acetone"), Some("64-17-5"), None);
        let (record, _) = check(mock, &input);

        assert_eq!(
            record.rejection_reason,
            Some(RejectionReason::PubchemDiscordance)
        );
    }

    #[test]
    fn missing_identifiers_reject_without_lookups() {
        let (record, calls) = check(MockProvider::new(), &row(None, None, None));
        assert_eq!(record.status, Status::Rejected);
        assert_eq!(
            record.rejection_reason,
            Some(RejectionReason::InsufficientIdentifiers)
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn smiles_without_name_and_cas_is_insufficient() {
        let (record, calls) = check(MockProvider::new(), &row(None, None, Some("CC(=O)C")));
        assert_eq!(
            record.rejection_reason,
            Some(RejectionReason::InsufficientIdentifiers)
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn bad_check_digit_rejects_without_lookups() {
        let input = row(Some("acetone"), Some("67-64-2"), Some("CC(=O)C"));
        let (record, calls) = check(acetone_mock(), &input);

        assert_eq!(record.rejection_reason, Some(RejectionReason::InvalidCas));
        assert_eq!(record.cas.as_deref(), Some("67-64-2"));
        assert_eq!(calls, 0);
    }

    #[test]
    fn bad_input_smiles_rejects_as_invalid() {
        let mock = MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "67-64-1", 180, ACETONE_KEY, "CC(=O)C")
            .with_failure(
                Namespace::Smiles,
                "C1CC",
                LookupError::BadInput("unable to standardize".to_string()),
            );

        let input = row(Some("acetone"), Some("67-64-1"), Some("C1CC"));
        let (record, _) = check(mock, &input);

        assert_eq!(record.rejection_reason, Some(RejectionReason::InvalidSmiles));
        assert!(record.lookup_error.as_deref().unwrap().contains("unable to standardize"));
    }

    #[test]
    fn two_agreeing_cids_reject_as_not_found() {
        // SMILES unknown to the service.
        let mock = MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "67-64-1", 180, ACETONE_KEY, "CC(=O)C");

        let input = row(Some("acetone"), Some("67-64-1"), Some("CC(=O)C"));
        let (record, _) = check(mock, &input);

        assert_eq!(
            record.rejection_reason,
            Some(RejectionReason::IdentifierNotFound)
        );
    }

    #[test]
    fn two_disagreeing_cids_reject_with_combined_reason() {
        let mock = MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Smiles, "CCO", 702, "LFQSCWFLJHTTHZ-UHFFFAOYSA-N", "CCO");

        let input = row(Some("acetone"), Some("50-00-0"), Some("CCO"));
        let (record, _) = check(mock, &input);

        assert_eq!(
            record.rejection_reason,
            Some(RejectionReason::IdentifierNotFoundAndPubchemDiscordance)
        );
    }

    #[test]
    fn transport_failures_reject_as_query_failed() {
        let refused = || LookupError::Transport("connection refused".to_string());
        let mock = MockProvider::new()
            .with_failure(Namespace::Name, "acetone", refused())
            .with_failure(Namespace::Name, "67-64-1", refused())
            .with_failure(Namespace::Name, "67641", refused())
            .with_failure(Namespace::Smiles, "CC(=O)C", refused());

        let input = row(Some("acetone"), Some("67-64-1"), Some("CC(=O)C"));
        let (record, _) = check(mock, &input);

        assert_eq!(
            record.rejection_reason,
            Some(RejectionReason::PubchemQueryFailed)
        );
        assert!(record.lookup_error.as_deref().unwrap().contains("connection refused"));
    }

    #[test]
    fn cas_dash_free_fallback_still_validates() {
        // Registered only under the bare digit form.
        let mock = MockProvider::new()
            .with_compound(Namespace::Name, "acetone", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Name, "67641", 180, ACETONE_KEY, "CC(=O)C")
            .with_compound(Namespace::Smiles, "CC(=O)C", 180, ACETONE_KEY, "CC(=O)C");

        let input = row(Some("acetone"), Some("67-64-1"), Some("CC(=O)C"));
        let (record, _) = check(mock, &input);

        assert_eq!(record.status, Status::Validated);
        assert_eq!(record.cid_by_cas, Some(180));
    }
}
