//! Validation record types.

use serde::{Deserialize, Serialize};

use crate::input::Row;

/// Final status of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// All supplied identifiers resolved to the same compound.
    Validated,
    /// The row failed validation; see the rejection reason.
    Rejected,
    /// Validated, but a stereoisomer of an earlier validated row.
    StereoDuplicate,
}

impl Status {
    /// Stable snake_case label, as written to the results table.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Validated => "validated",
            Status::Rejected => "rejected",
            Status::StereoDuplicate => "stereo_duplicate",
        }
    }
}

/// Why a row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The active mode's required identifiers were not all supplied.
    InsufficientIdentifiers,
    /// The supplied CAS number failed format or check-digit validation.
    InvalidCas,
    /// The lookup service rejected the SMILES string itself.
    InvalidSmiles,
    /// At least one required identifier found no compound.
    IdentifierNotFound,
    /// All identifiers resolved, but not to the same compound.
    PubchemDiscordance,
    /// One identifier found nothing and the others disagree.
    IdentifierNotFoundAndPubchemDiscordance,
    /// Lookups failed at the transport level rather than finding nothing.
    PubchemQueryFailed,
    /// The matched compound carries no retrievable SMILES.
    ComplexChemicalNoSmiles,
    /// Identical InChIKey to an earlier validated row.
    ExactDuplicate,
}

impl RejectionReason {
    /// Stable snake_case label, as written to the results table.
    pub fn label(&self) -> &'static str {
        match self {
            RejectionReason::InsufficientIdentifiers => "insufficient_identifiers",
            RejectionReason::InvalidCas => "invalid_cas",
            RejectionReason::InvalidSmiles => "invalid_smiles",
            RejectionReason::IdentifierNotFound => "identifier_not_found",
            RejectionReason::PubchemDiscordance => "pubchem_discordance",
            RejectionReason::IdentifierNotFoundAndPubchemDiscordance => {
                "identifier_not_found_and_pubchem_discordance"
            }
            RejectionReason::PubchemQueryFailed => "pubchem_query_failed",
            RejectionReason::ComplexChemicalNoSmiles => "complex_chemical_no_smiles",
            RejectionReason::ExactDuplicate => "exact_duplicate",
        }
    }
}

/// Where a row's SMILES came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmilesSource {
    /// Supplied in the input file.
    Input,
    /// Retrieved from PubChem by CID.
    Pubchem,
}

/// Operational mode for one row, determined once from which fields are
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Name, CAS, and SMILES all supplied; validate all three directly.
    Full,
    /// Name and CAS supplied; SMILES is retrieved from PubChem by CID.
    Retrieval,
}

impl ValidationMode {
    /// Determine the mode for a row, or `None` when the required
    /// identifiers for either mode are missing.
    pub fn for_row(row: &Row) -> Option<Self> {
        match (&row.name, &row.cas, &row.smiles) {
            (Some(_), Some(_), Some(_)) => Some(ValidationMode::Full),
            (Some(_), Some(_), None) => Some(ValidationMode::Retrieval),
            _ => None,
        }
    }
}

/// One row's annotated validation state.
///
/// Created once during the validation pass; only the duplicate pass mutates
/// it afterwards, and the group fields are write-once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub row_number: usize,
    pub name: Option<String>,
    /// Normalized CAS when normalization succeeded, the raw value otherwise.
    pub cas: Option<String>,
    pub smiles: Option<String>,
    pub smiles_source: Option<SmilesSource>,
    pub cid_by_name: Option<u64>,
    pub cid_by_cas: Option<u64>,
    pub cid_by_smiles: Option<u64>,
    pub inchikey_by_name: Option<String>,
    pub inchikey_by_cas: Option<String>,
    pub inchikey_by_smiles: Option<String>,
    /// The agreed CID, present only when the row validated.
    pub validated_cid: Option<u64>,
    pub validated_inchikey: Option<String>,
    /// 14-character connectivity prefix of the validated InChIKey.
    pub validated_inchikey14: Option<String>,
    pub status: Status,
    pub rejection_reason: Option<RejectionReason>,
    /// Lookup error texts accumulated during resolution, for traceability.
    pub lookup_error: Option<String>,
    pub exact_duplicate_group: Option<u32>,
    pub stereo_duplicate_group: Option<u32>,
}

impl ValidationRecord {
    /// Scratch record for a row; the checker always overwrites the status.
    pub(crate) fn from_row(row: &Row) -> Self {
        Self {
            row_number: row.row_number,
            name: row.name.clone(),
            cas: row.cas.clone(),
            smiles: row.smiles.clone(),
            smiles_source: row.smiles.as_ref().map(|_| SmilesSource::Input),
            cid_by_name: None,
            cid_by_cas: None,
            cid_by_smiles: None,
            inchikey_by_name: None,
            inchikey_by_cas: None,
            inchikey_by_smiles: None,
            validated_cid: None,
            validated_inchikey: None,
            validated_inchikey14: None,
            status: Status::Rejected,
            rejection_reason: None,
            lookup_error: None,
            exact_duplicate_group: None,
            stereo_duplicate_group: None,
        }
    }

    /// Mark the row rejected with a reason.
    pub(crate) fn reject(&mut self, reason: RejectionReason) {
        self.status = Status::Rejected;
        self.rejection_reason = Some(reason);
    }

    /// Record accumulated lookup error texts.
    pub(crate) fn note_errors(&mut self, errors: &[String]) {
        if !errors.is_empty() {
            self.lookup_error = Some(errors.join("; "));
        }
    }

    /// Whether the row is currently validated.
    pub fn is_validated(&self) -> bool {
        self.status == Status::Validated
    }
}
