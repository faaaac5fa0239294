//! The cleaning pipeline and its individual steps.
//!
//! Steps run in a fixed order, each over the output of the previous one:
//! filter, deduplicate, forward-fill, parse dates, derive delivery time,
//! winsorize outliers, enrich postal codes.

mod dates;
mod dedup;
mod diagnostics;
mod enrich;
mod fill;
mod filter;
mod outliers;
mod pipeline;

pub use dates::{
    delivery_days, delivery_summary, format_canonical_date, parse_canonical_date,
    DateColumnReport, DateParser, DEFAULT_DATE_FORMATS, MISSING_DATE,
};
pub use dedup::{drop_duplicates, row_key};
pub use diagnostics::CleaningDiagnostics;
pub use enrich::enrich_postal_codes;
pub use fill::{forward_fill, FillCounts};
pub use outliers::{winsorize_column, IqrBounds, OutlierReport, DEFAULT_IQR_MULTIPLIER};
pub use pipeline::{
    clean, list_countries, CleaningConfig, CleaningPipeline, CleaningResult, CleaningSummary,
};
