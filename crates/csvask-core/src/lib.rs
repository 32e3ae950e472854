//! csvask Core
//!
//! Domain model shared by the loader, the translator and the engine:
//! column types, the single-table schema and the optional configuration file.

pub mod schema;
pub mod config;
pub mod ident;

pub use schema::{Column, ColumnType, Schema, DEFAULT_TABLE_NAME};
pub use config::{Config, ConfigError, LoaderConfig, TranslatorConfig};
pub use ident::{is_identifier, quote_identifier};
