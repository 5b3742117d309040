//! Input handling: file parsing, column identification, and row extraction.

mod columns;
mod parser;
mod source;

pub use columns::{ColumnRoles, Row};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
