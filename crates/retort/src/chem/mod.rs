//! Chemical identifier primitives.
//!
//! Pure string-level handling of CAS registry numbers and InChIKeys. Nothing
//! here talks to PubChem; the [`crate::pubchem`] module handles resolution.

pub mod cas;
pub mod inchikey;

pub use cas::{is_valid_cas, normalize_cas};
pub use inchikey::connectivity_prefix;
