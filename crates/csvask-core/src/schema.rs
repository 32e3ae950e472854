//! Schema types for the loaded table

/// Table name used when no configuration overrides it
pub const DEFAULT_TABLE_NAME: &str = "data";

/// Coarse column type inferred from sampled CSV cells
///
/// Only two types exist. The type decides which aggregates the translator
/// considers safe to apply; every value is still stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Every non-empty sampled cell looked like a number
    Numeric,

    /// Anything else
    Text,
}

impl ColumnType {
    /// Affinity used in the `CREATE TABLE` statement
    pub fn sql_affinity(&self) -> &'static str {
        match self {
            Self::Numeric => "INTEGER",
            Self::Text => "TEXT",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "NUMERIC"),
            Self::Text => write!(f, "TEXT"),
        }
    }
}

/// A column of the loaded table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Sanitized identifier derived from the CSV header
    pub name: String,

    /// Inferred type
    pub column_type: ColumnType,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Whether numeric aggregates may target this column
    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }

    /// Lowercased name, the form matched against questions
    pub fn lower_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Ordered columns of the single table, in CSV header order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    /// Ordered list of columns
    pub columns: Vec<Column>,
}

impl Schema {
    /// Create a schema from columns
    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Columns classified as numeric, in schema order
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_numeric())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
