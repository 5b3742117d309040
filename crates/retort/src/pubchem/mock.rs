//! Mock compound provider for tests and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::provider::{CompoundMatch, CompoundProvider, LookupError, LookupResult, Namespace};

/// In-memory provider with scripted responses.
///
/// Identifiers not registered resolve to nothing, so an empty mock behaves
/// like a service that knows no compounds and works as an offline stand-in.
#[derive(Default)]
pub struct MockProvider {
    compounds: HashMap<(Namespace, String), Vec<CompoundMatch>>,
    smiles_by_cid: HashMap<u64, String>,
    failures: HashMap<(Namespace, String), LookupError>,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create an empty mock provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compound match for an identifier.
    pub fn with_compound(
        mut self,
        namespace: Namespace,
        identifier: impl Into<String>,
        cid: u64,
        inchikey: impl Into<String>,
        canonical_smiles: impl Into<String>,
    ) -> Self {
        self.compounds
            .entry((namespace, identifier.into()))
            .or_default()
            .push(CompoundMatch {
                cid,
                inchikey: Some(inchikey.into()),
                canonical_smiles: Some(canonical_smiles.into()),
            });
        self
    }

    /// Register the SMILES returned by a CID fetch.
    pub fn with_smiles(mut self, cid: u64, smiles: impl Into<String>) -> Self {
        self.smiles_by_cid.insert(cid, smiles.into());
        self
    }

    /// Script a lookup failure for an identifier.
    pub fn with_failure(
        mut self,
        namespace: Namespace,
        identifier: impl Into<String>,
        error: LookupError,
    ) -> Self {
        self.failures.insert((namespace, identifier.into()), error);
        self
    }

    /// Number of lookup calls made so far (CID fetches included).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompoundProvider for MockProvider {
    fn lookup(&self, identifier: &str, namespace: Namespace) -> LookupResult<Vec<CompoundMatch>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let key = (namespace, identifier.to_string());
        if let Some(error) = self.failures.get(&key) {
            return Err(error.clone());
        }

        Ok(self.compounds.get(&key).cloned().unwrap_or_default())
    }

    fn smiles_for_cid(&self, cid: u64) -> LookupResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.smiles_by_cid.get(&cid).cloned())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
