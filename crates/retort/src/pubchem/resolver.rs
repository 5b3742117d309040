//! Paced resolution with soft-failure handling.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use super::provider::{CompoundProvider, LookupError, Namespace};

/// Callback invoked with human-readable status strings for live progress
/// reporting. `None` on the resolver is a no-op.
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Resolver configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Fixed pause enforced before every outbound call.
    pub request_delay: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_millis(200),
        }
    }
}

impl ResolverConfig {
    /// Configuration without pacing, for tests and mock providers.
    pub fn no_delay() -> Self {
        Self {
            request_delay: Duration::ZERO,
        }
    }
}

/// Outcome of resolving one identifier.
///
/// A lookup that errored carries the error alongside empty fields; callers
/// treat it as not-found but may record the error text.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub cid: Option<u64>,
    pub inchikey: Option<String>,
    pub canonical_smiles: Option<String>,
    pub error: Option<LookupError>,
}

impl Resolution {
    fn not_found() -> Self {
        Self::default()
    }

    fn failed(error: LookupError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Whether the query failed because the service considered the
    /// identifier itself malformed.
    pub fn is_bad_input(&self) -> bool {
        matches!(self.error, Some(LookupError::BadInput(_)))
    }
}

/// Sequential, rate-paced resolver over a [`CompoundProvider`].
pub struct Resolver {
    provider: Arc<dyn CompoundProvider>,
    config: ResolverConfig,
    progress: Option<ProgressCallback>,
}

impl Resolver {
    /// Create a resolver over a provider.
    pub fn new(provider: Arc<dyn CompoundProvider>, config: ResolverConfig) -> Self {
        Self {
            provider,
            config,
            progress: None,
        }
    }

    /// Attach a progress callback.
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Report a status string to the progress callback, if any.
    pub fn report(&self, message: &str) {
        if let Some(ref cb) = self.progress {
            cb(message);
        }
    }

    fn pace(&self) {
        if !self.config.request_delay.is_zero() {
            thread::sleep(self.config.request_delay);
        }
    }

    /// Resolve one identifier, reporting the first match.
    ///
    /// Lookup errors are logged as warnings and degrade to not-found; they
    /// never propagate.
    pub fn resolve(&self, identifier: &str, namespace: Namespace) -> Resolution {
        self.pace();
        self.report(&format!("Querying {} '{identifier}'...", namespace.label()));
        debug!(
            "{} query: namespace={} identifier={identifier:?}",
            self.provider.name(),
            namespace.label()
        );

        match self.provider.lookup(identifier, namespace) {
            Ok(matches) => match matches.into_iter().next() {
                Some(m) => {
                    debug!(
                        "{} resolved: identifier={identifier:?} cid={} inchikey={:?}",
                        self.provider.name(),
                        m.cid,
                        m.inchikey
                    );
                    Resolution {
                        cid: Some(m.cid),
                        inchikey: m.inchikey,
                        canonical_smiles: m.canonical_smiles,
                        error: None,
                    }
                }
                None => {
                    debug!("{} no results for {identifier:?}", self.provider.name());
                    Resolution::not_found()
                }
            },
            Err(e) => {
                warn!(
                    "{} query failed ({}) for '{identifier}': {e}",
                    self.provider.name(),
                    namespace.label()
                );
                Resolution::failed(e)
            }
        }
    }

    /// Resolve a CAS number, falling back to the dash-free form.
    ///
    /// PubChem indexes some registry numbers only without separators; when
    /// the hyphenated form finds nothing, one more query with the hyphens
    /// stripped is attempted.
    pub fn resolve_cas(&self, cas: &str) -> Resolution {
        let first = self.resolve(cas, Namespace::Name);
        if first.cid.is_some() {
            return first;
        }

        let bare: String = cas.chars().filter(|c| *c != '-').collect();
        if bare == cas {
            return first;
        }

        let second = self.resolve(&bare, Namespace::Name);
        if second.cid.is_some() || second.error.is_some() {
            second
        } else {
            first
        }
    }

    /// Fetch the canonical SMILES for a CID.
    ///
    /// Errors degrade to `None` with the error returned alongside.
    pub fn smiles_for_cid(&self, cid: u64) -> (Option<String>, Option<LookupError>) {
        self.pace();
        self.report(&format!("Fetching SMILES for CID {cid}..."));
        debug!("{} SMILES fetch: cid={cid}", self.provider.name());

        match self.provider.smiles_for_cid(cid) {
            Ok(smiles) => (smiles, None),
            Err(e) => {
                warn!(
                    "{} SMILES fetch failed for CID {cid}: {e}",
                    self.provider.name()
                );
                (None, Some(e))
            }
        }
    }
}
