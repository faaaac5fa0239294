//! Exact duplicate row removal.

use std::collections::HashSet;

use crate::input::DataTable;

/// Drop rows equal in every cell to an earlier row, keeping first occurrences
/// in their original order. Returns the kept rows and the number removed.
///
/// All missing-value markers compare equal, so `""` and `NA` in the same
/// column do not keep two otherwise identical rows apart.
pub fn drop_duplicates(rows: Vec<Vec<String>>) -> (Vec<Vec<String>>, usize) {
    let before = rows.len();
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(before);
    let kept: Vec<Vec<String>> = rows
        .into_iter()
        .filter(|row| seen.insert(row_key(row)))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Comparison key of a row; missing cells become `None`.
pub fn row_key(row: &[String]) -> Vec<Option<String>> {
    row.iter()
        .map(|cell| (!DataTable::is_null_value(cell)).then(|| cell.clone()))
        .collect()
}
