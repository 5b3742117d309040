//! Retort: chemical identifier validation for tabular datasets.
//!
//! Retort takes rows carrying a chemical Name, a CAS registry number, and
//! optionally a SMILES string, resolves each identifier against PubChem, and
//! confirms that everything points at the same compound. Validated rows are
//! then scanned for exact duplicates (identical InChIKey) and stereoisomer
//! duplicates (identical InChIKey connectivity layer).
//!
//! # Core Principles
//!
//! - **Soft failures**: a lookup that errors or finds nothing rejects one
//!   row, never the batch
//! - **Non-destructive**: input rows are never modified; every verdict is
//!   recorded alongside the original values
//! - **Deterministic**: rows are processed in input order and duplicate
//!   groups are numbered in first-seen order
//!
//! # Example
//!
//! ```no_run
//! use retort::Retort;
//!
//! let retort = Retort::new();
//! let report = retort.validate_file("chemicals.csv").unwrap();
//!
//! println!("Validated: {}", report.summary.validated);
//! println!("Rejected: {}", report.summary.rejected);
//! ```

pub mod chem;
pub mod error;
pub mod input;
pub mod pubchem;
pub mod report;
pub mod validation;

mod retort;

pub use crate::retort::{Retort, RetortConfig, ValidationReport, ValidationSummary};
pub use error::{Result, RetortError};
pub use input::{ColumnRoles, DataTable, Parser, ParserConfig, Row, SourceMetadata};
pub use pubchem::{
    CompoundMatch, CompoundProvider, LookupError, MockProvider, Namespace, ProgressCallback,
    PubChemClient, Resolver, ResolverConfig,
};
pub use validation::{RejectionReason, SmilesSource, Status, ValidationRecord};
