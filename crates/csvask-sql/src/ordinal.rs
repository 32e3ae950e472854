//! English ordinal words

/// Ordinals in lookup order. Earlier entries win when several appear.
const ORDINALS: [(&str, u32); 10] = [
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
];

/// Find an ordinal word anywhere in a lowercased question
///
/// Matching is by substring and follows list order, not position in the
/// text: "tenth or first" yields 1.
pub fn parse_ordinal(question: &str) -> Option<u32> {
    ORDINALS
        .iter()
        .find(|(word, _)| question.contains(word))
        .map(|(_, rank)| *rank)
}
