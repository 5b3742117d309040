//! CLI command implementations.

pub mod cas;
pub mod validate;
