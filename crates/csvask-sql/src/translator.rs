//! Question translator

use csvask_core::{Config, Schema, TranslatorConfig, DEFAULT_TABLE_NAME};

use crate::intent::Intent;
use crate::rules::{self, FilterContext};
use crate::statement::SqlStatement;

/// Turns questions into SQL against one table
///
/// Stateless apart from its settings: the same question and schema always
/// produce the same statement.
#[derive(Debug, Clone)]
pub struct Translator {
    table_name: String,
    filter_hints: Vec<String>,
}

impl Translator {
    /// Translator for `table_name` with the default filter hints
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            filter_hints: TranslatorConfig::default().filter_hints,
        }
    }

    /// Build from the loader table name and translator settings
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.loader.table_name.clone())
            .with_filter_hints(config.translator.filter_hints.clone())
    }

    /// Replace the columns eligible for "from <word>" filters
    pub fn with_filter_hints(mut self, hints: Vec<String>) -> Self {
        self.filter_hints = hints.into_iter().map(|h| h.to_lowercase()).collect();
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Derive the intent of `question`
    pub fn intent(&self, question: &str, schema: &Schema) -> Intent {
        let question = question.to_lowercase();

        let mut verb = rules::select_verb(&question, schema);
        tracing::debug!(?verb, "verb selected");

        if let Some(rank_verb) = rules::ordinal_override(&question, schema) {
            tracing::debug!(verb = ?rank_verb, "ordinal override");
            verb = rank_verb;
        }

        let ctx = FilterContext {
            question: &question,
            hints: &self.filter_hints,
        };
        let filter = rules::detect_filter(&ctx, schema);
        if let Some(filter) = &filter {
            tracing::debug!(column = filter.column(), "filter detected");
        }

        let order_by = rules::detect_order_by(&question, schema);
        if let Some(order) = &order_by {
            tracing::debug!(column = %order.column, direction = %order.direction, "ordering detected");
        }

        Intent::new(verb).with_filter(filter).with_order_by(order_by)
    }

    /// Translate `question` into a statement
    pub fn translate(&self, question: &str, schema: &Schema) -> SqlStatement {
        let intent = self.intent(question, schema);
        if intent.is_degenerate() {
            tracing::warn!(question, "no numeric column mentioned for aggregate");
        }

        let statement = intent.to_statement(&self.table_name);
        tracing::debug!(sql = %statement.sql, params = statement.params.len(), "translated");
        statement
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_NAME)
    }
}

/// Translate with the default table name and hints
pub fn translate(question: &str, schema: &Schema) -> SqlStatement {
    Translator::default().translate(question, schema)
}
