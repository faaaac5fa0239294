//! Spreadsheet (xlsx/xls/ods) reading via calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::parser::ParserConfig;
use super::source::DataTable;
use crate::error::{Result, SalescopeError};
use crate::stats::format_number;

/// Read one worksheet into a [`DataTable`].
///
/// The first row is the header. Date cells are rendered as ISO dates so the
/// date step parses them the same way as delimited input.
pub fn read_workbook(path: &Path, config: &ParserConfig) -> Result<DataTable> {
    let workbook_error = |message: String| SalescopeError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;

    let sheet_name = match &config.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SalescopeError::EmptyData("Workbook has no sheets".to_string()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| workbook_error(format!("sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();

    let headers: Vec<String> = if config.has_header {
        match rows.next() {
            Some(cells) => cells.iter().map(|c| cell_text(c).trim().to_string()).collect(),
            None => return Err(SalescopeError::EmptyData("No header row found".to_string())),
        }
    } else {
        (0..range.width()).map(|i| format!("column_{}", i + 1)).collect()
    };

    if headers.is_empty() {
        return Err(SalescopeError::EmptyData("No columns found".to_string()));
    }

    let take = config.max_rows.unwrap_or(usize::MAX);
    let data: Vec<Vec<String>> = rows
        .take(take)
        .map(|cells| {
            let mut row: Vec<String> = cells.iter().map(cell_text).collect();
            row.resize(headers.len(), String::new());
            row
        })
        .collect();

    if data.is_empty() {
        return Err(SalescopeError::EmptyData("No data rows found".to_string()));
    }

    Ok(DataTable::new(headers, data, b','))
}

/// Render a cell as text.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if ndt.time() == chrono::NaiveTime::MIN => {
                ndt.format("%Y-%m-%d").to_string()
            }
            Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => String::new(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}
