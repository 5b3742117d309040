//! Compound provider trait and shared types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier namespace understood by the lookup service.
///
/// CAS numbers are looked up through the `name` namespace, since PubChem
/// indexes registry numbers as synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Name,
    Smiles,
}

impl Namespace {
    /// Wire-level namespace label.
    pub fn label(&self) -> &'static str {
        match self {
            Namespace::Name => "name",
            Namespace::Smiles => "smiles",
        }
    }
}

/// One compound match returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundMatch {
    /// PubChem compound identifier.
    pub cid: u64,
    /// Standard InChIKey, when the service supplies one.
    pub inchikey: Option<String>,
    /// Canonical SMILES, when the service supplies one.
    pub canonical_smiles: Option<String>,
}

/// Errors surfaced by a compound lookup.
///
/// "Zero matches" is not an error: providers return an empty vec for
/// identifiers the service simply does not know.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The service rejected the identifier itself (e.g. unparseable SMILES).
    #[error("bad input: {0}")]
    BadInput(String),

    /// Network-level failure reaching the service.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success response other than not-found or bad-input.
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },
}

/// Result type for provider operations.
pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Trait for compound lookup services.
///
/// Implementations must be thread-safe (`Send + Sync`) so a whole validation
/// run can be moved onto a background thread.
pub trait CompoundProvider: Send + Sync {
    /// Look up compounds matching one identifier.
    ///
    /// An empty vec means the identifier is unknown to the service; callers
    /// use the first match when several are returned.
    fn lookup(&self, identifier: &str, namespace: Namespace) -> LookupResult<Vec<CompoundMatch>>;

    /// Fetch the canonical SMILES for a known CID.
    ///
    /// `Ok(None)` means the compound exists but carries no SMILES (typical
    /// for polymers and other complex substances).
    fn smiles_for_cid(&self, cid: u64) -> LookupResult<Option<String>>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
