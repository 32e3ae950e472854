//! Statement execution against the loaded table

use std::fmt;

use csvask_loader::LoadedTable;
use csvask_sql::{validate, SqlStatement, ValidationError};
use rusqlite::params_from_iter;
use rusqlite::types::Value;

/// Errors raised while running a statement
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// A single result value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Integer(i) => Self::Integer(i),
            Value::Real(f) => Self::Real(f),
            Value::Text(s) => Self::Text(s),
            Value::Blob(b) => Self::Blob(b),
        }
    }
}

impl fmt::Display for Cell {
    /// NULL renders empty; reals always keep a fractional part (`30.0`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Real(r) => f.write_str(&format_real(*r)),
            Self::Text(s) => f.write_str(s),
            Self::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Shortest round-trip form, switching to `1e+16` / `1.5e-05` notation
/// outside `[1e-4, 1e16)`
fn format_real(r: f64) -> String {
    if r.is_nan() {
        return "nan".to_string();
    }
    if r.is_infinite() {
        return if r > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = r.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{:e}", r);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => scientific,
        };
    }

    if r.fract() == 0.0 {
        format!("{:.1}", r)
    } else {
        format!("{}", r)
    }
}

/// Column names and rows returned by a query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl QueryResult {
    /// The only value, when the result is exactly one row by one column
    pub fn scalar(&self) -> Option<&Cell> {
        match self.rows.as_slice() {
            [row] if row.len() == 1 => row.first(),
            _ => None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Validate and run `statement`, collecting every row
pub fn execute(table: &LoadedTable, statement: &SqlStatement) -> Result<QueryResult, ExecuteError> {
    validate(&statement.sql)?;

    let connection = table.connection();
    let mut prepared = connection.prepare(&statement.sql)?;
    let columns: Vec<String> = prepared
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = prepared.query(params_from_iter(statement.params.iter()))?;
    while let Some(row) = cursor.next()? {
        let cells = (0..width)
            .map(|idx| row.get::<_, Value>(idx).map(Cell::from))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(cells);
    }

    tracing::debug!(rows = rows.len(), columns = width, "query executed");
    Ok(QueryResult { columns, rows })
}
