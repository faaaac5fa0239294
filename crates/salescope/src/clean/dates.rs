//! Date parsing and delivery time derivation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::input::DataTable;
use crate::stats::mean;

/// Formats tried in order when no configuration is given.
///
/// Slash dates are read month-first and fall back to day-first when the
/// month-first reading is impossible (e.g. `31/07/2012`).
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%d-%m-%Y",
    "%d.%m.%Y",
];

/// Written in place of a date that could not be parsed or was missing.
///
/// Forward-fill does not treat it as a gap, so re-cleaning leaves it alone,
/// and no date format accepts it.
pub const MISSING_DATE: &str = "NaT";

const CANONICAL_DATE: &str = "%Y-%m-%d";
const CANONICAL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

const SECONDS_PER_DAY: i64 = 86_400;

/// Parses date cells against an ordered list of chrono formats.
#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl DateParser {
    /// Create a parser that tries `formats` in order.
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    /// Parse one cell. Missing markers and unrecognised text are `None`.
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        if DataTable::is_null_value(value) {
            return None;
        }
        let value = value.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.naive_local());
        }

        self.formats.iter().find_map(|fmt| {
            NaiveDateTime::parse_from_str(value, fmt)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(value, fmt)
                        .ok()
                        .map(|d| d.and_time(NaiveTime::MIN))
                })
        })
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect())
    }
}

/// Render a parsed date the way the date step writes it back.
pub fn format_canonical_date(value: &NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format(CANONICAL_DATE).to_string()
    } else {
        value.format(CANONICAL_DATETIME).to_string()
    }
}

/// Parse a cell written by [`format_canonical_date`].
pub fn parse_canonical_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, CANONICAL_DATETIME)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, CANONICAL_DATE)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Outcome of parsing one date column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateColumnReport {
    /// Column name.
    pub column: String,
    /// Whether the column exists in the data.
    pub present: bool,
    /// Cells parsed successfully.
    pub parsed: usize,
    /// Cells with text that matched no format.
    pub unparseable: usize,
    /// Cells that were already missing or carried the missing-date marker.
    pub missing: usize,
}

impl DateColumnReport {
    /// Rows carrying a missing-date marker after parsing.
    pub fn invalid(&self) -> usize {
        self.unparseable + self.missing
    }
}

/// Parse a date column in place, rewriting parsed cells canonically and
/// marking the rest with [`MISSING_DATE`]. Returns the parsed values by row.
pub fn parse_date_column(
    table: &mut DataTable,
    column: &str,
    parser: &DateParser,
) -> (Vec<Option<NaiveDateTime>>, DateColumnReport) {
    let mut report = DateColumnReport {
        column: column.to_string(),
        ..DateColumnReport::default()
    };

    let Some(index) = table.column_index(column) else {
        return (vec![None; table.row_count()], report);
    };
    report.present = true;

    let values = table
        .rows
        .iter_mut()
        .map(|row| {
            let cell = &mut row[index];
            if cell.as_str() == MISSING_DATE || DataTable::is_null_value(cell) {
                report.missing += 1;
                *cell = MISSING_DATE.to_string();
                return None;
            }
            match parser.parse(cell) {
                Some(parsed) => {
                    report.parsed += 1;
                    *cell = format_canonical_date(&parsed);
                    Some(parsed)
                }
                None => {
                    report.unparseable += 1;
                    *cell = MISSING_DATE.to_string();
                    None
                }
            }
        })
        .collect();

    (values, report)
}

/// Whole days from `order` to `ship`, rounded toward negative infinity.
pub fn delivery_days(order: &NaiveDateTime, ship: &NaiveDateTime) -> i64 {
    (*ship - *order).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Write per-row delivery time into `column` and return the mean over rows
/// where both dates are defined.
pub fn derive_delivery_time(
    table: &mut DataTable,
    column: &str,
    order_dates: &[Option<NaiveDateTime>],
    ship_dates: &[Option<NaiveDateTime>],
) -> (Option<f64>, usize) {
    let index = table.ensure_column(column);
    let mut total = 0i64;
    let mut defined = 0usize;

    for (row_idx, row) in table.rows.iter_mut().enumerate() {
        let order = order_dates.get(row_idx).copied().flatten();
        let ship = ship_dates.get(row_idx).copied().flatten();
        row[index] = match (order, ship) {
            (Some(order), Some(ship)) => {
                let days = delivery_days(&order, &ship);
                total += days;
                defined += 1;
                days.to_string()
            }
            _ => String::new(),
        };
    }

    let undefined = table.row_count() - defined;
    let average = (defined > 0).then(|| total as f64 / defined as f64);
    (average, undefined)
}

/// Mean and undefined count of an already-derived delivery time column.
///
/// Empty cells are undefined. An absent column counts every row as
/// undefined.
pub fn delivery_summary(table: &DataTable, column: &str) -> (Option<f64>, usize) {
    let Some(index) = table.column_index(column) else {
        return (None, table.row_count());
    };

    let days: Vec<f64> = table
        .column_values(index)
        .filter_map(|cell| cell.parse::<i64>().ok())
        .map(|d| d as f64)
        .collect();

    (mean(&days), table.row_count() - days.len())
}
