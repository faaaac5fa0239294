//! Country selection.

use crate::input::DataTable;

/// Copy the rows whose value in column `index` equals `value` exactly.
///
/// Copied rows are padded or truncated to the header width.
pub fn filter_rows(table: &DataTable, index: usize, value: &str) -> Vec<Vec<String>> {
    let width = table.column_count();
    table
        .rows
        .iter()
        .filter(|row| row.get(index).map(|v| v == value).unwrap_or(false))
        .map(|row| {
            let mut row = row.clone();
            row.resize(width, String::new());
            row
        })
        .collect()
}
