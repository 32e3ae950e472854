//! Shape check of generated SQL using the sqlparser tokenizer
//!
//! Translation never fails. A question the heuristics could not place shows
//! up as an empty statement or one that begins with a clause instead of
//! `SELECT`; those are rejected here. Everything else is left to SQLite,
//! whose grammar accepts identifiers (`Interval`, `Data`, ...) that a full
//! sqlparser parse would refuse.

use sqlparser::dialect::SQLiteDialect;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, Tokenizer};

/// Why a generated statement was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("could not build a query from the question")]
    Empty,

    #[error("could not build a query from the question (generated SQL starts with {0})")]
    MissingSelect(String),

    #[error("generated SQL is invalid: {0}")]
    Parse(String),

    #[error("expected a single statement, found {0}")]
    MultipleStatements(usize),
}

/// Check that `sql` is a single statement starting with `SELECT`
pub fn validate(sql: &str) -> Result<(), ValidationError> {
    let tokens = Tokenizer::new(&SQLiteDialect {}, sql)
        .tokenize()
        .map_err(|e| ValidationError::Parse(e.to_string()))?;

    let significant: Vec<Token> = tokens
        .into_iter()
        .filter(|t| !matches!(t, Token::Whitespace(_)))
        .collect();

    let statements: Vec<&[Token]> = significant
        .split(|t| *t == Token::SemiColon)
        .filter(|s| !s.is_empty())
        .collect();

    match statements.as_slice() {
        [] => Err(ValidationError::Empty),
        [statement] => match statement.first() {
            Some(Token::Word(word)) if word.keyword == Keyword::SELECT => Ok(()),
            Some(first) => Err(ValidationError::MissingSelect(first.to_string())),
            None => Err(ValidationError::Empty),
        },
        many => Err(ValidationError::MultipleStatements(many.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_shapes() {
        for sql in [
            "SELECT COUNT(*) FROM data",
            "SELECT AVG(Age) FROM data",
            "SELECT Name, City FROM data WHERE Age >= 30 ORDER BY Age DESC",
            "SELECT * FROM data WHERE City = ?1 COLLATE NOCASE",
            "SELECT score FROM data ORDER BY score DESC LIMIT 1 OFFSET 1",
            "SELECT SUM(\"Order\") FROM data;",
        ] {
            assert_eq!(validate(sql), Ok(()), "{}", sql);
        }
    }

    #[test]
    fn sqlite_identifiers_are_not_second_guessed() {
        assert_eq!(validate("SELECT MAX(Interval) FROM data"), Ok(()));
    }

    #[test]
    fn rejects_degenerate_sql() {
        assert_eq!(validate(""), Err(ValidationError::Empty));
        assert_eq!(validate("   "), Err(ValidationError::Empty));
        assert_eq!(validate(" ; "), Err(ValidationError::Empty));
        assert_eq!(
            validate("WHERE Age > 3"),
            Err(ValidationError::MissingSelect("WHERE".to_string()))
        );
    }

    #[test]
    fn rejects_other_statements() {
        assert_eq!(
            validate("DELETE FROM data"),
            Err(ValidationError::MissingSelect("DELETE".to_string()))
        );
        assert_eq!(
            validate("SELECT 1; SELECT 2"),
            Err(ValidationError::MultipleStatements(2))
        );
        assert!(matches!(
            validate("SELECT 'unterminated"),
            Err(ValidationError::Parse(_))
        ));
    }
}
