//! Building the in-memory table from a CSV file

use std::io::Read;
use std::path::Path;

use csvask_core::{quote_identifier, Column, LoaderConfig, Schema};
use rusqlite::{params_from_iter, Connection};

use crate::header::sanitize_headers;
use crate::inference::infer_column_type;

/// Errors that can occur while loading a CSV file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV file has no headers")]
    NoHeaders,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// A CSV file loaded into a private in-memory database
///
/// Owns the connection; dropping the value closes the database.
#[derive(Debug)]
pub struct LoadedTable {
    connection: Connection,
    table_name: String,
    schema: Schema,
    row_count: usize,
}

impl LoadedTable {
    /// Connection holding the table
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Columns in header order with their inferred types
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of data rows inserted
    pub fn row_count(&self) -> usize {
        self.row_count
    }
}

/// Reads delimited text into a [`LoadedTable`]
#[derive(Debug, Clone, Default)]
pub struct TableLoader {
    config: LoaderConfig,
}

impl TableLoader {
    /// Create a loader with the given settings
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a CSV file from disk
    pub fn load_path(&self, path: &Path) -> Result<LoadedTable, LoadError> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loading CSV");
        self.load_reader(file)
    }

    /// Load CSV content from a string
    pub fn load_str(&self, content: &str) -> Result<LoadedTable, LoadError> {
        self.load_reader(content.as_bytes())
    }

    /// Load CSV content from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<LoadedTable, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .delimiter(self.config.delimiter_byte())
            .trim(csv::Trim::All)
            .from_reader(reader);

        let raw_headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|s| s.to_string())
            .collect();

        if raw_headers.is_empty() {
            return Err(LoadError::NoHeaders);
        }

        let names = sanitize_headers(raw_headers.iter().map(String::as_str));
        let width = names.len();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            if record.len() != width {
                tracing::warn!(
                    line = line + 2,
                    fields = record.len(),
                    expected = width,
                    "row width differs from header, normalizing"
                );
            }
            rows.push(normalize_row(&record, width));
        }

        let sample = &rows[..rows.len().min(self.config.sample_rows)];
        let columns: Vec<Column> = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let column_type = infer_column_type(sample, idx);
                tracing::debug!(column = %name, %column_type, "inferred column type");
                Column::new(name, column_type)
            })
            .collect();
        let schema = Schema::from_columns(columns);

        let mut connection = Connection::open_in_memory()?;
        let table_name = self.config.table_name.clone();
        connection.execute(&create_table_sql(&table_name, &schema), [])?;

        let tx = connection.transaction()?;
        {
            let mut insert = tx.prepare(&insert_sql(&table_name, schema.len()))?;
            for row in &rows {
                insert.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        tracing::info!(
            table = %table_name,
            columns = schema.len(),
            rows = rows.len(),
            "CSV loaded"
        );

        Ok(LoadedTable {
            connection,
            table_name,
            schema,
            row_count: rows.len(),
        })
    }
}

/// Pad short records with empty strings and truncate long ones
fn normalize_row(record: &csv::StringRecord, width: usize) -> Vec<String> {
    let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
    row.resize(width, String::new());
    row
}

fn create_table_sql(table_name: &str, schema: &Schema) -> String {
    let columns = schema
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(&c.name), c.column_type.sql_affinity()))
        .collect::<Vec<_>>()
        .join(", ");

    format!("CREATE TABLE {} ({});", quote_identifier(table_name), columns)
}

fn insert_sql(table_name: &str, width: usize) -> String {
    let placeholders = vec!["?"; width].join(",");
    format!("INSERT INTO {} VALUES ({})", quote_identifier(table_name), placeholders)
}
