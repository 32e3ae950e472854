//! Structured meaning of a question
//!
//! Every column name held here comes from the schema, never from the
//! question text.

use std::fmt;

/// Aggregate functions the translator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    Sum,
    Avg,
    Max,
    Min,
}

impl fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => write!(f, "SUM"),
            Self::Avg => write!(f, "AVG"),
            Self::Max => write!(f, "MAX"),
            Self::Min => write!(f, "MIN"),
        }
    }
}

/// What the statement selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// `COUNT(<column>)`, or `COUNT(*)` when no column was mentioned
    Count { column: Option<String> },

    /// `SUM`/`AVG`/`MAX`/`MIN` over a mentioned numeric column
    Aggregate { func: AggregateFunc, column: String },

    /// An aggregate keyword matched but no mentioned column is numeric.
    /// Renders no SELECT clause at all.
    Unresolved { func: AggregateFunc },

    /// `SELECT *`
    AllColumns,

    /// `SELECT a, b, ...` for the mentioned columns
    Columns(Vec<String>),

    /// Rank query: the `rank`-th highest value of `column` (1-based)
    NthHighest { column: String, rank: u32 },
}

/// Comparison operators accepted in numeric filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

impl ComparisonOp {
    /// Parse the operator text captured from a question
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Eq),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            ">=" => Some(Self::GtEq),
            "<=" => Some(Self::LtEq),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single WHERE predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `<column> <op> <number>`; `value` is the literal as written
    Compare {
        column: String,
        op: ComparisonOp,
        value: String,
    },

    /// Case-insensitive text equality, value bound as a parameter
    Equals { column: String, value: String },
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Self::Compare { column, .. } | Self::Equals { column, .. } => column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

/// Everything derived from one question
#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub verb: Verb,
    pub filter: Option<Filter>,
    pub order_by: Option<OrderBy>,
}

impl Intent {
    /// Intent with only a verb
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            filter: None,
            order_by: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<Filter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_order_by(mut self, order_by: Option<OrderBy>) -> Self {
        self.order_by = order_by;
        self
    }

    /// Whether the verb produced no SELECT clause
    pub fn is_degenerate(&self) -> bool {
        matches!(self.verb, Verb::Unresolved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_symbols() {
        for symbol in ["=", ">", "<", ">=", "<="] {
            let op = ComparisonOp::from_symbol(symbol).unwrap();
            assert_eq!(op.as_str(), symbol);
        }
        assert_eq!(ComparisonOp::from_symbol("!="), None);
    }

    #[test]
    fn degenerate_only_for_unresolved() {
        assert!(Intent::new(Verb::Unresolved { func: AggregateFunc::Sum }).is_degenerate());
        assert!(!Intent::new(Verb::AllColumns).is_degenerate());
    }
}
