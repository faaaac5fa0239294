//! Main Salescope struct and public API.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clean::{list_countries, CleaningConfig, CleaningPipeline, CleaningResult};
use crate::error::{Result, SalescopeError};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::postal::PostalLookup;
use crate::report::SalesReport;

/// Configuration for loading and cleaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalescopeConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Cleaning pipeline configuration.
    pub cleaning: CleaningConfig,
}

impl SalescopeConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SalescopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: SalescopeConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SalescopeError::Config(format!("{}: {}", path.display(), e)))?;
        config.cleaning.validate()?;
        Ok(config)
    }
}

/// Result of cleaning and aggregating one country of a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Cleaned rows, summary and diagnostics.
    pub cleaning: CleaningResult,
    /// Aggregate tables over the cleaned rows.
    pub report: SalesReport,
}

/// Loads sales data files and runs the cleaning pipeline on them.
pub struct Salescope {
    parser: Parser,
    pipeline: CleaningPipeline,
    postal: PostalLookup,
}

impl Salescope {
    /// Create an instance with default configuration and the built-in
    /// postal table.
    pub fn new() -> Self {
        Self::with_config(SalescopeConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: SalescopeConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            pipeline: CleaningPipeline::with_config(config.cleaning),
            postal: PostalLookup::germany().clone(),
        }
    }

    /// Replace the postal lookup used for enrichment.
    pub fn with_postal_lookup(mut self, lookup: PostalLookup) -> Self {
        self.postal = lookup;
        self
    }

    /// The postal lookup used for enrichment.
    pub fn postal_lookup(&self) -> &PostalLookup {
        &self.postal
    }

    /// Parse a data file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Countries available for selection in a data file.
    pub fn countries(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let (table, _) = self.load(path)?;
        list_countries(&table)
    }

    /// Clean an already-loaded table for one country.
    pub fn clean(&self, table: &DataTable, country: &str) -> Result<CleaningResult> {
        self.pipeline.clean(table, country, &self.postal)
    }

    /// Load a file, clean it for one country and build the aggregate report.
    pub fn analyze(&self, path: impl AsRef<Path>, country: &str) -> Result<AnalysisResult> {
        let (table, source) = self.load(path)?;
        let cleaning = self.clean(&table, country)?;
        let report = SalesReport::build(&cleaning.table);

        Ok(AnalysisResult {
            source,
            cleaning,
            report,
        })
    }
}

impl Default for Salescope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_analyze_simple_csv() {
        let content = "Country,City,Order ID,Sales,Profit,Order Date,Ship Date\n\
                       Germany,Munich,O1,10,1,2023-01-01,2023-01-03\n\
                       Austria,Vienna,O2,20,2,2023-01-01,2023-01-02\n";
        let file = create_test_file(content);

        let result = Salescope::new().analyze(file.path(), "Germany").unwrap();

        assert_eq!(result.source.row_count, 2);
        assert_eq!(result.source.format, "csv");
        assert!(result.source.hash.starts_with("sha256:"));
        assert_eq!(result.cleaning.table.row_count(), 1);
        assert_eq!(result.cleaning.summary.average_delivery_time, Some(2.0));
        assert_eq!(
            result.cleaning.table.column_by_name("Postal Code").unwrap(),
            vec!["80331"]
        );
        assert_eq!(result.report.city_sales.rows.len(), 1);
    }

    #[test]
    fn test_custom_postal_lookup() {
        let file = create_test_file("Country,City\nAustria,Vienna\n");
        let lookup = PostalLookup::from_pairs([("Vienna", "1010-1230")]);

        let result = Salescope::new()
            .with_postal_lookup(lookup)
            .analyze(file.path(), "Austria")
            .unwrap();

        assert_eq!(
            result.cleaning.table.column_by_name("Postal Code").unwrap(),
            vec!["1010"]
        );
    }

    #[test]
    fn test_config_from_json_file() {
        let file = create_test_file(r#"{"cleaning": {"iqr_multiplier": 3.0}}"#);
        let config = SalescopeConfig::from_json_file(file.path()).unwrap();

        assert_eq!(config.cleaning.iqr_multiplier, 3.0);
        assert_eq!(config.cleaning.numeric_columns.len(), 5);
        assert!(config.parser.has_header);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let file = create_test_file(r#"{"cleaning": {"iqr_multiplier": -2}}"#);
        assert!(matches!(
            SalescopeConfig::from_json_file(file.path()),
            Err(SalescopeError::Config(_))
        ));
    }

    #[test]
    fn test_countries() {
        let file = create_test_file("Country,Sales\nGermany,1\nAustria,2\nGermany,3\n");
        assert_eq!(
            Salescope::new().countries(file.path()).unwrap(),
            vec!["Austria", "Germany"]
        );
    }
}
