//! Flat-file snapshots of cleaned data and JSON reports.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::clean::{CleaningDiagnostics, CleaningSummary};
use crate::error::{Result, SalescopeError};
use crate::input::{DataTable, SourceMetadata};
use crate::report::SalesReport;
use crate::salescope::AnalysisResult;

/// Conventional snapshot file name for a country.
pub fn snapshot_file_name(country: &str) -> String {
    format!("Updated_{}_data.csv", country)
}

/// Write the cleaned table as `Updated_<country>_data.csv` in `dir`.
pub fn write_snapshot(dir: impl AsRef<Path>, country: &str, table: &DataTable) -> Result<PathBuf> {
    let path = dir.as_ref().join(snapshot_file_name(country));
    write_csv(&path, table)?;
    Ok(path)
}

/// Write a table as comma-delimited text with a header row.
pub fn write_csv(path: impl AsRef<Path>, table: &DataTable) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let file = File::create(path).map_err(|e| SalescopeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .from_writer(BufWriter::new(file));

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| SalescopeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(file = %path.display(), rows = table.row_count(), "wrote snapshot");
    Ok(())
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    source: &'a SourceMetadata,
    summary: &'a CleaningSummary,
    diagnostics: &'a CleaningDiagnostics,
    report: &'a SalesReport,
}

/// Save the summary, diagnostics and aggregate tables of a run as JSON.
///
/// The cleaned rows themselves go to the CSV snapshot, not here.
pub fn save_report(path: impl AsRef<Path>, result: &AnalysisResult) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let file = File::create(path).map_err(|e| {
        SalescopeError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let document = ReportDocument {
        source: &result.source,
        summary: &result.cleaning.summary,
        diagnostics: &result.cleaning.diagnostics,
        report: &result.report,
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &document).map_err(|e| {
        SalescopeError::Persistence(format!("Failed to serialize report: {}", e))
    })?;

    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                SalescopeError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
