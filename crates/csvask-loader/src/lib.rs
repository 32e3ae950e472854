//! CSV loading into an in-memory SQLite table
//!
//! This crate handles:
//! - Reading a delimited file with a header row
//! - Turning raw headers into identifier-safe column names
//! - Inferring a coarse NUMERIC/TEXT type per column from a sample
//! - Creating the table and inserting every row as text

pub mod header;
pub mod inference;
pub mod table;

pub use header::{sanitize_header, sanitize_headers};
pub use inference::{infer_column_type, looks_numeric};
pub use table::{LoadError, LoadedTable, TableLoader};
