//! Structured record of what a cleaning run did.

use serde::{Deserialize, Serialize};

use super::dates::DateColumnReport;
use super::outliers::OutlierReport;

/// Counts and per-step reports from one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningDiagnostics {
    /// Selected country.
    pub country: String,
    /// Rows in the source table.
    pub input_rows: usize,
    /// Rows matching the country.
    pub filtered_rows: usize,
    /// Exact duplicate rows dropped.
    pub duplicates_removed: usize,
    /// Rows dropped because cleaning made them copies of an earlier row.
    pub duplicates_after_cleaning: usize,
    /// Cells filled from a preceding row.
    pub cells_filled: usize,
    /// Missing cells with no preceding value.
    pub cells_still_missing: usize,
    /// Order Date parsing outcome.
    pub order_dates: DateColumnReport,
    /// Ship Date parsing outcome.
    pub ship_dates: DateColumnReport,
    /// Rows without a delivery time.
    pub undefined_delivery_times: usize,
    /// Outlier step, one entry per numeric column present.
    pub outliers: Vec<OutlierReport>,
    /// Rows whose city was found in the postal lookup.
    pub rows_with_postal_code: usize,
    /// Rows left without a postal code.
    pub rows_without_postal_code: usize,
    /// Rows in the cleaned table.
    pub output_rows: usize,
}

impl CleaningDiagnostics {
    /// Rows carrying a missing-date marker in either date column.
    pub fn invalid_dates(&self) -> usize {
        self.order_dates.invalid() + self.ship_dates.invalid()
    }

    /// Total cells replaced by the outlier step.
    pub fn outliers_replaced(&self) -> usize {
        self.outliers.iter().map(|o| o.replaced).sum()
    }

    /// Non-fatal conditions worth showing to the user.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.filtered_rows == 0 {
            warnings.push(format!("No rows found for country '{}'", self.country));
        }

        for report in [&self.order_dates, &self.ship_dates] {
            if !report.present {
                warnings.push(format!("Column '{}' not found", report.column));
            } else if report.invalid() > 0 {
                warnings.push(format!(
                    "{} invalid values in '{}' ({} unparseable, {} missing)",
                    report.invalid(),
                    report.column,
                    report.unparseable,
                    report.missing
                ));
            }
        }

        for report in &self.outliers {
            if report.non_numeric > 0 {
                warnings.push(format!(
                    "{} non-numeric values in '{}' left unchanged",
                    report.non_numeric, report.column
                ));
            }
        }

        warnings
    }
}
