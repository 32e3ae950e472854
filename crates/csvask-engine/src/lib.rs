//! csvask engine - running generated SQL and presenting results
//!
//! This crate implements:
//! - Validation and execution of a translated statement
//! - Conversion of SQLite values into printable cells
//! - Scalar vs grid rendering

pub mod execute;
pub mod output;

pub use execute::{execute, Cell, ExecuteError, QueryResult};
pub use output::render;
