//! Salescope: country-level cleaning and descriptive analysis of sales data.
//!
//! A sales table (Global Superstore shape) is filtered to one country and
//! passed through a fixed cleaning pipeline, after which summary figures and
//! group-by tables are computed from the cleaned rows.
//!
//! # Pipeline
//!
//! 1. Filter rows to the selected country
//! 2. Drop exact duplicate rows
//! 3. Forward-fill missing values
//! 4. Parse Order Date and Ship Date
//! 5. Derive Delivery Time in days
//! 6. Replace IQR outliers in numeric columns with the column median
//! 7. Look up Postal Code from City
//!
//! Rows that the later steps turn into copies of an earlier row are dropped
//! at the end, so the output never holds two identical rows.
//!
//! # Example
//!
//! ```no_run
//! use salescope::Salescope;
//!
//! let salescope = Salescope::new();
//! let result = salescope.analyze("superstore.csv", "Germany").unwrap();
//!
//! println!("Orders: {}", result.cleaning.summary.total_orders);
//! println!("Duplicates removed: {}", result.cleaning.diagnostics.duplicates_removed);
//! ```

pub mod clean;
pub mod error;
pub mod input;
pub mod postal;
pub mod report;
pub mod schema;
pub mod snapshot;
pub mod stats;

mod salescope;

pub use crate::salescope::{AnalysisResult, Salescope, SalescopeConfig};
pub use clean::{
    clean, list_countries, CleaningConfig, CleaningDiagnostics, CleaningPipeline, CleaningResult,
    CleaningSummary,
};
pub use error::{Result, SalescopeError};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use postal::PostalLookup;
pub use report::SalesReport;
pub use snapshot::{save_report, write_csv, write_snapshot};
