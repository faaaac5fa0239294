//! Forward-fill of missing cells.

use crate::input::DataTable;

/// Counts from a forward-fill pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillCounts {
    /// Cells replaced with the preceding value.
    pub filled: usize,
    /// Leading-gap cells with nothing to copy from.
    pub still_missing: usize,
}

/// Replace each missing cell with the nearest preceding non-missing value in
/// the same column. Cells in a leading gap are normalised to empty text.
pub fn forward_fill(table: &mut DataTable) -> FillCounts {
    let mut counts = FillCounts::default();

    for col in 0..table.column_count() {
        let mut last: Option<String> = None;
        for row in &mut table.rows {
            let Some(cell) = row.get_mut(col) else {
                continue;
            };
            if DataTable::is_null_value(cell) {
                match &last {
                    Some(value) => {
                        *cell = value.clone();
                        counts.filled += 1;
                    }
                    None => {
                        cell.clear();
                        counts.still_missing += 1;
                    }
                }
            } else {
                last = Some(cell.clone());
            }
        }
    }

    counts
}
