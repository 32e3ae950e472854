//! Question to SQL translation
//!
//! This crate handles:
//! - Deriving an [`Intent`] from a plain-English question and the table schema
//! - Assembling the intent into a parameterised [`SqlStatement`]
//! - Checking generated SQL with sqlparser before it reaches the database
//!
//! Matching is a fixed cascade of keyword heuristics. There is no grammar:
//! the first rule that applies in each phase wins and is never revisited.

pub mod intent;
pub mod ordinal;
pub mod rules;
pub mod statement;
pub mod translator;
pub mod validate;

pub use intent::{AggregateFunc, ComparisonOp, Filter, Intent, OrderBy, SortDirection, Verb};
pub use ordinal::parse_ordinal;
pub use statement::SqlStatement;
pub use translator::{translate, Translator};
pub use validate::{validate, ValidationError};
