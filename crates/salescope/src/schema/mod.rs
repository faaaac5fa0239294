//! Column names and typed row access for the sales dataset.

pub mod columns;
mod record;

pub use record::{records, ColumnIndex, SalesRecord};
