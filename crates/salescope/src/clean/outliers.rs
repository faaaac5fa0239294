//! IQR-based outlier winsorization.
//!
//! Each column is handled on its own: bounds and median come from that
//! column's values before any replacement, and no column's result feeds into
//! another column's statistics.

use serde::{Deserialize, Serialize};

use crate::input::DataTable;
use crate::stats::{format_number, parse_number, quantile_sorted, sorted};

/// Default IQR multiplier for the outlier fences.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Quartiles, fences and median of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
    pub median: f64,
}

impl IqrBounds {
    /// Compute bounds over `values`. `None` when there are no values.
    pub fn compute(values: &[f64], multiplier: f64) -> Option<Self> {
        let sorted = sorted(values);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let median = quantile_sorted(&sorted, 0.5)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
            median,
        })
    }

    /// Returns true if `value` lies within the fences (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// What the outlier step did to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Column name.
    pub column: String,
    /// Numeric cells the statistics were computed over.
    pub values: usize,
    /// Non-missing cells that were not numbers; left untouched.
    pub non_numeric: usize,
    /// Bounds used, if the column had any numeric values.
    pub bounds: Option<IqrBounds>,
    /// Cells replaced with the median.
    pub replaced: usize,
}

/// Winsorize one column in place. Returns `None` if the column is absent.
pub fn winsorize_column(
    table: &mut DataTable,
    column: &str,
    multiplier: f64,
) -> Option<OutlierReport> {
    let index = table.column_index(column)?;

    let mut non_numeric = 0;
    let parsed: Vec<Option<f64>> = table
        .column_values(index)
        .map(|cell| {
            let value = parse_number(cell);
            if value.is_none() && !DataTable::is_null_value(cell) {
                non_numeric += 1;
            }
            value
        })
        .collect();

    let values: Vec<f64> = parsed.iter().flatten().copied().collect();
    let bounds = IqrBounds::compute(&values, multiplier);

    let mut replaced = 0;
    if let Some(bounds) = bounds {
        let median_text = format_number(bounds.median);
        for (row, value) in table.rows.iter_mut().zip(&parsed) {
            if let Some(v) = value {
                if !bounds.contains(*v) {
                    row[index] = median_text.clone();
                    replaced += 1;
                }
            }
        }
    }

    tracing::debug!(column, values = values.len(), replaced, "winsorized column");

    Some(OutlierReport {
        column: column.to_string(),
        values: values.len(),
        non_numeric,
        bounds,
        replaced,
    })
}
