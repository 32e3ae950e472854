//! Matching phases
//!
//! Each phase walks an ordered rule list against the lowercased question and
//! stops at the first rule that applies:
//! verb, ordinal override, filter, ordering.

use csvask_core::{Column, Schema};
use regex::Regex;

use crate::intent::{AggregateFunc, ComparisonOp, Filter, OrderBy, SortDirection, Verb};
use crate::ordinal::parse_ordinal;

/// Columns whose lowercased name occurs in the question, in schema order
pub fn mentioned_columns<'s>(question: &str, schema: &'s Schema) -> Vec<&'s Column> {
    schema
        .columns
        .iter()
        .filter(|c| question.contains(&c.lower_name()))
        .collect()
}

/// First mentioned column that is numeric
fn first_mentioned_numeric<'s>(question: &str, schema: &'s Schema) -> Option<&'s Column> {
    schema
        .numeric_columns()
        .find(|c| question.contains(&c.lower_name()))
}

#[derive(Debug, Clone, Copy)]
enum VerbRule {
    Count,
    Aggregate(AggregateFunc),
    AllColumns,
}

/// Keyword rules for the verb phase, checked top to bottom
const VERB_RULES: &[(&[&str], VerbRule)] = &[
    (&["count", "how many"], VerbRule::Count),
    (&["sum", "total"], VerbRule::Aggregate(AggregateFunc::Sum)),
    (&["average", "avg"], VerbRule::Aggregate(AggregateFunc::Avg)),
    (&["max", "maximum", "highest"], VerbRule::Aggregate(AggregateFunc::Max)),
    (&["min", "minimum", "lowest"], VerbRule::Aggregate(AggregateFunc::Min)),
    (&["all", "*"], VerbRule::AllColumns),
];

/// Choose what the statement selects
pub fn select_verb(question: &str, schema: &Schema) -> Verb {
    let rule = VERB_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| question.contains(k)))
        .map(|(_, rule)| *rule);

    match rule {
        Some(VerbRule::Count) => Verb::Count {
            column: mentioned_columns(question, schema)
                .first()
                .map(|c| c.name.clone()),
        },
        Some(VerbRule::Aggregate(func)) => match first_mentioned_numeric(question, schema) {
            Some(column) => Verb::Aggregate {
                func,
                column: column.name.clone(),
            },
            None => Verb::Unresolved { func },
        },
        Some(VerbRule::AllColumns) => Verb::AllColumns,
        None => {
            let selected = mentioned_columns(question, schema);
            if selected.is_empty() {
                Verb::AllColumns
            } else {
                Verb::Columns(selected.into_iter().map(|c| c.name.clone()).collect())
            }
        }
    }
}

/// Rank query replacing the verb: an ordinal plus "max"/"highest" plus a
/// mentioned numeric column
pub fn ordinal_override(question: &str, schema: &Schema) -> Option<Verb> {
    let rank = parse_ordinal(question)?;

    if !["max", "highest"].iter().any(|k| question.contains(k)) {
        return None;
    }

    first_mentioned_numeric(question, schema).map(|column| Verb::NthHighest {
        column: column.name.clone(),
        rank,
    })
}

/// Inputs shared by the filter rules
pub struct FilterContext<'a> {
    pub question: &'a str,
    /// Lowercased column names eligible for "from <word>"
    pub hints: &'a [String],
}

type FilterRule = fn(&FilterContext<'_>, &Column) -> Option<Filter>;

/// Per-column filter rules, checked top to bottom
const FILTER_RULES: &[FilterRule] = &[numeric_comparison, text_equality, from_hint];

/// Find the WHERE predicate
///
/// Columns are scanned in schema order and the first column satisfying any
/// rule decides the filter; later columns are never considered.
pub fn detect_filter(ctx: &FilterContext<'_>, schema: &Schema) -> Option<Filter> {
    schema
        .columns
        .iter()
        .find_map(|column| FILTER_RULES.iter().find_map(|rule| rule(ctx, column)))
}

/// `<column> <op> <number>`, spaces optional
fn numeric_comparison(ctx: &FilterContext<'_>, column: &Column) -> Option<Filter> {
    let pattern = format!(
        r"{} *(=|>|<|>=|<=) *([\d.]+)",
        regex::escape(&column.lower_name())
    );
    let captures = Regex::new(&pattern).ok()?.captures(ctx.question)?;

    let op = ComparisonOp::from_symbol(captures.get(1)?.as_str())?;
    let value = captures.get(2)?.as_str();

    // `[\d.]+` also admits things like "1.2.3"
    if !value.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
        return None;
    }

    Some(Filter::Compare {
        column: column.name.clone(),
        op,
        value: value.to_string(),
    })
}

/// `<column> is <value>` or `<column> = <value>`; quoted values may contain spaces
fn text_equality(ctx: &FilterContext<'_>, column: &Column) -> Option<Filter> {
    let pattern = format!(
        r"{} *(?:is|=) *(?:'([^']*)'|([^\s']+))",
        regex::escape(&column.lower_name())
    );
    let captures = Regex::new(&pattern).ok()?.captures(ctx.question)?;

    let value = captures
        .get(1)
        .or_else(|| captures.get(2))?
        .as_str()
        .trim();

    if value.is_empty() {
        return None;
    }

    Some(Filter::Equals {
        column: column.name.clone(),
        value: value.to_string(),
    })
}

/// "from <word>" for hinted columns such as city or name
fn from_hint(ctx: &FilterContext<'_>, column: &Column) -> Option<Filter> {
    let lower = column.lower_name();
    if !ctx.hints.iter().any(|hint| hint.eq_ignore_ascii_case(&lower)) {
        return None;
    }

    let captures = Regex::new(r"from (\w+)").ok()?.captures(ctx.question)?;

    Some(Filter::Equals {
        column: column.name.clone(),
        value: captures.get(1)?.as_str().to_string(),
    })
}

/// "order by <token>": first column whose name occurs in the token
pub fn detect_order_by(question: &str, schema: &Schema) -> Option<OrderBy> {
    let (_, rest) = question.split_once("order by")?;
    let token = rest.split_whitespace().next()?;

    let column = schema
        .columns
        .iter()
        .find(|c| token.contains(&c.lower_name()))?;

    let direction = if question.contains("desc") || question.contains("highest") {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };

    Some(OrderBy {
        column: column.name.clone(),
        direction,
    })
}
