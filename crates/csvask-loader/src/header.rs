//! Header sanitization
//!
//! Raw CSV headers become SQL identifiers: trim, spaces to underscores,
//! drop everything outside `[A-Za-z0-9_]`.

use std::collections::HashSet;

/// Sanitize a single raw header
///
/// Does not guarantee uniqueness or a non-empty result; see [`sanitize_headers`].
pub fn sanitize_header(raw: &str) -> String {
    raw.trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Sanitize a full header row into unique identifiers
///
/// Keywords such as `Order` are kept as they are; generated SQL quotes them.
///
/// - empty results become `column_<n>` (1-based position)
/// - a leading digit gets a `_` prefix
/// - repeats get `_2`, `_3`, ... appended
pub fn sanitize_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for (idx, header) in raw.into_iter().enumerate() {
        let mut name = sanitize_header(header);

        if name.is_empty() {
            name = format!("column_{}", idx + 1);
        } else if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }

        let mut unique = name.clone();
        let mut suffix = 2;
        while !seen.insert(unique.to_lowercase()) {
            unique = format!("{}_{}", name, suffix);
            suffix += 1;
        }

        if unique != header {
            tracing::debug!(raw = header, column = %unique, "sanitized header");
        }
        names.push(unique);
    }

    names
}
