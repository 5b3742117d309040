//! Compound resolution against PubChem.
//!
//! This module isolates everything that touches the external database:
//! - [`CompoundProvider`]: the lookup contract (by name/SMILES, plus a
//!   SMILES-by-CID fetch)
//! - [`PubChemClient`]: PUG REST implementation over blocking HTTP
//! - [`MockProvider`]: in-memory implementation for tests and offline runs
//! - [`Resolver`]: pacing, soft-failure handling, and progress reporting
//!   on top of a provider
//!
//! All lookup failures are soft: the resolver logs them and reports
//! not-found, so a flaky network rejects rows instead of aborting runs.

mod mock;
mod provider;
mod resolver;
mod rest;

pub use mock::MockProvider;
pub use provider::{CompoundMatch, CompoundProvider, LookupError, LookupResult, Namespace};
pub use resolver::{ProgressCallback, Resolution, Resolver, ResolverConfig};
pub use rest::PubChemClient;
