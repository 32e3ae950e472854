//! Column type inference from sampled rows

use csvask_core::ColumnType;

/// Whether a single non-empty cell reads as a number
///
/// One `.` and every `-` are ignored before checking that only ASCII digits
/// remain, so `-3.5` and `2024-01-05` both qualify.
pub fn looks_numeric(cell: &str) -> bool {
    let without_dot = cell.replacen('.', "", 1);
    let digits: String = without_dot.chars().filter(|c| *c != '-').collect();

    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Infer the type of column `index` from the sampled rows
///
/// NUMERIC needs at least one non-empty cell and every non-empty cell
/// numeric-looking. Rows too short to reach the column are ignored.
pub fn infer_column_type<R: AsRef<[String]>>(sample: &[R], index: usize) -> ColumnType {
    let mut non_empty = sample
        .iter()
        .filter_map(|row| row.as_ref().get(index))
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .peekable();

    if non_empty.peek().is_none() {
        return ColumnType::Text;
    }

    if non_empty.all(looks_numeric) {
        ColumnType::Numeric
    } else {
        ColumnType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn numeric_cells() {
        assert!(looks_numeric("30"));
        assert!(looks_numeric("27.5"));
        assert!(looks_numeric("-4"));
        assert!(looks_numeric("2024-01-05"));
        assert!(!looks_numeric("1.2.3"));
        assert!(!looks_numeric("NYC"));
        assert!(!looks_numeric("-"));
        assert!(!looks_numeric("."));
        assert!(!looks_numeric("1e5"));
    }

    #[test]
    fn mixed_column_is_text() {
        let sample = rows(&[&["1"], &["two"]]);
        assert_eq!(infer_column_type(&sample, 0), ColumnType::Text);
    }

    #[test]
    fn empty_cells_are_skipped() {
        let sample = rows(&[&["1"], &[""], &["3.5"]]);
        assert_eq!(infer_column_type(&sample, 0), ColumnType::Numeric);
    }

    #[test]
    fn all_empty_column_is_text() {
        let sample = rows(&[&[""], &["  "], &[""]]);
        assert_eq!(infer_column_type(&sample, 0), ColumnType::Text);
    }

    #[test]
    fn no_sample_is_text() {
        let sample: Vec<Vec<String>> = Vec::new();
        assert_eq!(infer_column_type(&sample, 0), ColumnType::Text);
    }

    #[test]
    fn short_rows_do_not_count() {
        let sample = rows(&[&["a", "1"], &["b"]]);
        assert_eq!(infer_column_type(&sample, 1), ColumnType::Numeric);
        assert_eq!(infer_column_type(&sample, 2), ColumnType::Text);
    }
}
