//! Per-row consistency checking and whole-dataset duplicate classification.

pub mod checker;
pub mod duplicates;
mod record;

pub use checker::Checker;
pub use duplicates::DuplicateCounts;
pub use record::{RejectionReason, SmilesSource, Status, ValidationMode, ValidationRecord};
