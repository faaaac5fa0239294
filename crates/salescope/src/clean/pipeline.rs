//! The cleaning pipeline: a fixed sequence of passes over one country's rows.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::dates::{
    delivery_summary, derive_delivery_time, parse_date_column, DateParser, DEFAULT_DATE_FORMATS,
};
use super::dedup::drop_duplicates;
use super::diagnostics::CleaningDiagnostics;
use super::enrich::enrich_postal_codes;
use super::fill::forward_fill;
use super::filter::filter_rows;
use super::outliers::{winsorize_column, DEFAULT_IQR_MULTIPLIER};
use crate::error::{Result, SalescopeError};
use crate::input::DataTable;
use crate::postal::PostalLookup;
use crate::schema::{columns, records};

/// Cleaning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// chrono formats tried, in order, for Order Date and Ship Date.
    pub date_formats: Vec<String>,
    /// Multiplier applied to the IQR to place the outlier fences.
    pub iqr_multiplier: f64,
    /// Columns winsorized by the outlier step.
    pub numeric_columns: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            numeric_columns: columns::NUMERIC.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CleaningConfig {
    /// Check the configuration for values the pipeline cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(SalescopeError::Config(format!(
                "iqr_multiplier must be a non-negative number, got {}",
                self.iqr_multiplier
            )));
        }
        if self.date_formats.is_empty() {
            return Err(SalescopeError::Config(
                "date_formats must list at least one format".to_string(),
            ));
        }
        Ok(())
    }
}

/// Headline figures of a cleaned dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Number of cleaned rows.
    pub total_orders: usize,
    /// Sum of Sales.
    pub total_sales: f64,
    /// Sum of Profit.
    pub total_profit: f64,
    /// Distinct non-missing Customer IDs.
    pub distinct_customers: usize,
    /// Mean delivery time in days over rows where it is defined.
    pub average_delivery_time: Option<f64>,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningResult {
    /// The cleaned rows, including the derived columns.
    pub table: DataTable,
    /// Headline figures.
    pub summary: CleaningSummary,
    /// What each step did.
    pub diagnostics: CleaningDiagnostics,
}

/// Runs the cleaning steps in their fixed order.
#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    config: CleaningConfig,
    dates: DateParser,
}

impl CleaningPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(CleaningConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: CleaningConfig) -> Self {
        let dates = DateParser::new(config.date_formats.clone());
        Self { config, dates }
    }

    /// The active configuration.
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Clean the rows of `table` belonging to `country`.
    ///
    /// Fails only when a required column is absent. A country with no rows
    /// yields an empty table; unparseable dates are reported in the
    /// diagnostics rather than raised.
    pub fn clean(
        &self,
        table: &DataTable,
        country: &str,
        lookup: &PostalLookup,
    ) -> Result<CleaningResult> {
        for &required in columns::REQUIRED {
            if !table.has_column(required) {
                return Err(SalescopeError::missing_column(required));
            }
        }
        let country_index = table
            .column_index(columns::COUNTRY)
            .ok_or_else(|| SalescopeError::missing_column(columns::COUNTRY))?;

        let mut diagnostics = CleaningDiagnostics {
            country: country.to_string(),
            input_rows: table.row_count(),
            ..CleaningDiagnostics::default()
        };

        // 1. Filter
        let rows = filter_rows(table, country_index, country);
        diagnostics.filtered_rows = rows.len();
        tracing::debug!(country, rows = rows.len(), "filtered rows by country");

        // 2. Deduplicate
        let (rows, removed) = drop_duplicates(rows);
        diagnostics.duplicates_removed = removed;
        tracing::debug!(removed, "dropped duplicate rows");

        let mut cleaned = table.with_rows(rows);

        // 3. Forward-fill
        let fill = forward_fill(&mut cleaned);
        diagnostics.cells_filled = fill.filled;
        diagnostics.cells_still_missing = fill.still_missing;
        tracing::debug!(filled = fill.filled, still_missing = fill.still_missing, "forward-filled");

        // 4. Parse dates
        let (order_dates, order_report) =
            parse_date_column(&mut cleaned, columns::ORDER_DATE, &self.dates);
        let (ship_dates, ship_report) =
            parse_date_column(&mut cleaned, columns::SHIP_DATE, &self.dates);
        for report in [&order_report, &ship_report] {
            if report.invalid() > 0 {
                tracing::warn!(
                    column = %report.column,
                    unparseable = report.unparseable,
                    missing = report.missing,
                    "invalid date values"
                );
            }
        }
        diagnostics.order_dates = order_report;
        diagnostics.ship_dates = ship_report;

        // 5. Delivery time
        let (_, undefined) = derive_delivery_time(
            &mut cleaned,
            columns::DELIVERY_TIME,
            &order_dates,
            &ship_dates,
        );
        tracing::debug!(undefined, "derived delivery time");

        // 6. Outliers, each column against its own pre-replacement values
        for column in &self.config.numeric_columns {
            if let Some(report) =
                winsorize_column(&mut cleaned, column, self.config.iqr_multiplier)
            {
                diagnostics.outliers.push(report);
            }
        }

        // 7. Postal codes
        let (matched, _) = enrich_postal_codes(&mut cleaned, lookup);
        tracing::debug!(matched, "enriched postal codes");

        // Filling and replacement can turn distinct rows into copies
        let (rows, collapsed) = drop_duplicates(std::mem::take(&mut cleaned.rows));
        cleaned.rows = rows;
        diagnostics.duplicates_after_cleaning = collapsed;
        if collapsed > 0 {
            tracing::debug!(collapsed, "dropped rows made identical by cleaning");
        }

        let (average_delivery_time, undefined) =
            delivery_summary(&cleaned, columns::DELIVERY_TIME);
        diagnostics.undefined_delivery_times = undefined;

        let with_code = cleaned
            .column_by_name(columns::POSTAL_CODE)
            .map(|codes| codes.iter().filter(|c| !c.is_empty()).count())
            .unwrap_or(0);
        diagnostics.rows_with_postal_code = with_code;
        diagnostics.rows_without_postal_code = cleaned.row_count() - with_code;

        diagnostics.output_rows = cleaned.row_count();

        let summary = summarize(&cleaned, average_delivery_time);

        tracing::info!(
            country,
            rows = cleaned.row_count(),
            duplicates = diagnostics.duplicates_removed,
            outliers = diagnostics.outliers_replaced(),
            invalid_dates = diagnostics.invalid_dates(),
            "cleaning complete"
        );

        Ok(CleaningResult {
            table: cleaned,
            summary,
            diagnostics,
        })
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Clean `table` for `country` with the default configuration.
pub fn clean(table: &DataTable, country: &str, lookup: &PostalLookup) -> Result<CleaningResult> {
    CleaningPipeline::new().clean(table, country, lookup)
}

/// Distinct non-missing countries, sorted, for choosing a selection.
pub fn list_countries(table: &DataTable) -> Result<Vec<String>> {
    let index = table
        .column_index(columns::COUNTRY)
        .ok_or_else(|| SalescopeError::missing_column(columns::COUNTRY))?;

    let mut countries: Vec<String> = table
        .column_values(index)
        .filter(|v| !DataTable::is_null_value(v))
        .map(|v| v.to_string())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    countries.sort();
    Ok(countries)
}

fn summarize(table: &DataTable, average_delivery_time: Option<f64>) -> CleaningSummary {
    let mut summary = CleaningSummary {
        total_orders: table.row_count(),
        average_delivery_time,
        ..CleaningSummary::default()
    };

    let mut customers: HashSet<&str> = HashSet::new();
    for record in records(table) {
        summary.total_sales += record.sales.unwrap_or(0.0);
        summary.total_profit += record.profit.unwrap_or(0.0);
        if let Some(customer) = record.customer_id {
            customers.insert(customer);
        }
    }
    summary.distinct_customers = customers.len();

    summary
}
