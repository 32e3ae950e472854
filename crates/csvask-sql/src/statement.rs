//! SQL assembly from an [`Intent`]
//!
//! Identifiers come only from the schema and are quoted when they collide with
//! an SQLite keyword. Text filter values are bound as parameters.
//!
//! Text equality also carries `COLLATE NOCASE`. That is more than binding:
//! the question is lowercased before matching, so `city is nyc` is compared
//! without case and matches a stored `NYC`, which an exact `=` would not.

use std::fmt;

use csvask_core::quote_identifier;

use crate::intent::{Filter, Intent, Verb};

/// Generated SQL with positional parameters (`?1`, `?2`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    /// Statement text handed to the database
    pub sql: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<String>,
}

impl SqlStatement {
    /// Statement without parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Render with parameters inlined as quoted SQL literals, for display
    pub fn inline(&self) -> String {
        let mut sql = self.sql.clone();
        // Highest index first so `?1` never clobbers `?10`
        for (idx, value) in self.params.iter().enumerate().rev() {
            let literal = format!("'{}'", value.replace('\'', "''"));
            sql = sql.replace(&format!("?{}", idx + 1), &literal);
        }
        sql
    }

    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }
}

impl fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inline())
    }
}

impl Intent {
    /// Assemble the statement against `table`
    ///
    /// A rank query keeps its own ordering: any WHERE goes before it and an
    /// explicit "order by" is dropped.
    pub fn to_statement(&self, table: &str) -> SqlStatement {
        let table = quote_identifier(table);
        let mut sql = match &self.verb {
            Verb::Count { column } => format!(
                "SELECT COUNT({}) FROM {}",
                column.as_deref().map_or("*".into(), quote_identifier),
                table
            ),
            Verb::Aggregate { func, column } => {
                format!("SELECT {}({}) FROM {}", func, quote_identifier(column), table)
            }
            Verb::Unresolved { .. } => String::new(),
            Verb::AllColumns => format!("SELECT * FROM {}", table),
            Verb::Columns(columns) => {
                let list = columns
                    .iter()
                    .map(|c| quote_identifier(c))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("SELECT {} FROM {}", list, table)
            }
            Verb::NthHighest { column, .. } => {
                format!("SELECT {} FROM {}", quote_identifier(column), table)
            }
        };
        let mut params = Vec::new();

        match &self.filter {
            Some(Filter::Compare { column, op, value }) => {
                sql.push_str(&format!(" WHERE {} {} {}", quote_identifier(column), op, value));
            }
            Some(Filter::Equals { column, value }) => {
                params.push(value.clone());
                sql.push_str(&format!(
                    " WHERE {} = ?{} COLLATE NOCASE",
                    quote_identifier(column),
                    params.len()
                ));
            }
            None => {}
        }

        if let Verb::NthHighest { column, rank } = &self.verb {
            sql.push_str(&format!(
                " ORDER BY {} DESC LIMIT 1 OFFSET {}",
                quote_identifier(column),
                rank.saturating_sub(1)
            ));
        } else if let Some(order) = &self.order_by {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                quote_identifier(&order.column),
                order.direction
            ));
        }

        SqlStatement {
            sql: sql.trim().to_string(),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{AggregateFunc, ComparisonOp, OrderBy, SortDirection};
    use pretty_assertions::assert_eq;

    #[test]
    fn aggregate_statement() {
        let intent = Intent::new(Verb::Aggregate {
            func: AggregateFunc::Avg,
            column: "Age".to_string(),
        });
        assert_eq!(intent.to_statement("data"), SqlStatement::new("SELECT AVG(Age) FROM data"));
    }

    #[test]
    fn text_filter_is_bound() {
        let intent = Intent::new(Verb::AllColumns).with_filter(Some(Filter::Equals {
            column: "City".to_string(),
            value: "nyc".to_string(),
        }));
        let statement = intent.to_statement("data");

        assert_eq!(statement.sql, "SELECT * FROM data WHERE City = ?1 COLLATE NOCASE");
        assert_eq!(statement.params, vec!["nyc"]);
        assert_eq!(
            statement.to_string(),
            "SELECT * FROM data WHERE City = 'nyc' COLLATE NOCASE"
        );
    }

    #[test]
    fn inline_escapes_quotes() {
        let statement = SqlStatement {
            sql: "SELECT * FROM data WHERE Name = ?1".to_string(),
            params: vec!["o'brien".to_string()],
        };
        assert_eq!(statement.inline(), "SELECT * FROM data WHERE Name = 'o''brien'");
    }

    #[test]
    fn rank_query_places_filter_first() {
        let intent = Intent::new(Verb::NthHighest {
            column: "score".to_string(),
            rank: 2,
        })
        .with_filter(Some(Filter::Compare {
            column: "score".to_string(),
            op: ComparisonOp::Lt,
            value: "90".to_string(),
        }))
        .with_order_by(Some(OrderBy {
            column: "score".to_string(),
            direction: SortDirection::Asc,
        }));

        assert_eq!(
            intent.to_statement("data").sql,
            "SELECT score FROM data WHERE score < 90 ORDER BY score DESC LIMIT 1 OFFSET 1"
        );
    }

    #[test]
    fn unresolved_verb_leaves_only_clauses() {
        let bare = Intent::new(Verb::Unresolved { func: AggregateFunc::Sum });
        assert!(bare.to_statement("data").is_empty());

        let with_filter = bare.with_filter(Some(Filter::Compare {
            column: "Age".to_string(),
            op: ComparisonOp::Gt,
            value: "3".to_string(),
        }));
        assert_eq!(with_filter.to_statement("data").sql, "WHERE Age > 3");
    }

    #[test]
    fn keyword_columns_are_quoted() {
        let intent = Intent::new(Verb::Aggregate {
            func: AggregateFunc::Sum,
            column: "Order".to_string(),
        })
        .with_filter(Some(Filter::Equals {
            column: "Group".to_string(),
            value: "b".to_string(),
        }));
        assert_eq!(
            intent.to_statement("data").sql,
            "SELECT SUM(\"Order\") FROM data WHERE \"Group\" = ?1 COLLATE NOCASE"
        );
    }

    #[test]
    fn explicit_ordering() {
        let intent = Intent::new(Verb::Columns(vec!["Name".to_string(), "Age".to_string()]))
            .with_order_by(Some(OrderBy {
                column: "Age".to_string(),
                direction: SortDirection::Desc,
            }));
        assert_eq!(
            intent.to_statement("data").sql,
            "SELECT Name, Age FROM data ORDER BY Age DESC"
        );
    }
}
