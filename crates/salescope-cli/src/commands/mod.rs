//! CLI command implementations.

pub mod clean;
pub mod countries;
pub mod report;

use std::path::PathBuf;

use salescope::{PostalLookup, Salescope, SalescopeConfig};

/// Build a `Salescope` from optional config and postal lookup files.
pub fn build_salescope(
    config: Option<&PathBuf>,
    postal_codes: Option<&PathBuf>,
) -> salescope::Result<Salescope> {
    let config = match config {
        Some(path) => SalescopeConfig::from_json_file(path)?,
        None => SalescopeConfig::default(),
    };

    let mut salescope = Salescope::with_config(config);
    if let Some(path) = postal_codes {
        salescope = salescope.with_postal_lookup(PostalLookup::from_json_file(path)?);
    }
    Ok(salescope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_use_builtin_postal_table() {
        let salescope = build_salescope(None, None).unwrap();
        assert_eq!(salescope.postal_lookup().postal_code("Berlin"), Some("10115"));
    }

    #[test]
    fn test_postal_codes_file_replaces_table() {
        let file = json_file(r#"{"Vienna": "1010-1230"}"#);
        let path = file.path().to_path_buf();

        let salescope = build_salescope(None, Some(&path)).unwrap();

        assert_eq!(salescope.postal_lookup().postal_code("Vienna"), Some("1010"));
        assert!(!salescope.postal_lookup().contains("Berlin"));
    }

    #[test]
    fn test_config_date_formats_reach_the_pipeline() {
        let config = json_file(r#"{"cleaning": {"date_formats": ["%d.%m.%Y"]}}"#);
        let config_path = config.path().to_path_buf();
        let data = json_file("Country,Order Date,Ship Date\nGermany,2023-01-01,03.01.2023\n");

        let configured = build_salescope(Some(&config_path), None)
            .unwrap()
            .analyze(data.path(), "Germany")
            .unwrap();
        let defaults = build_salescope(None, None)
            .unwrap()
            .analyze(data.path(), "Germany")
            .unwrap();

        assert_eq!(configured.cleaning.diagnostics.order_dates.unparseable, 1);
        assert_eq!(configured.cleaning.diagnostics.ship_dates.unparseable, 0);
        assert_eq!(defaults.cleaning.diagnostics.order_dates.unparseable, 0);
        assert_eq!(defaults.cleaning.summary.average_delivery_time, Some(2.0));
    }

    #[test]
    fn test_config_parser_settings_reach_countries() {
        let config = json_file(r#"{"parser": {"max_rows": 1}}"#);
        let config_path = config.path().to_path_buf();
        let data = json_file("Country,City\nGermany,Berlin\nFrance,Paris\n");

        let limited = build_salescope(Some(&config_path), None)
            .unwrap()
            .countries(data.path())
            .unwrap();
        let all = build_salescope(None, None).unwrap().countries(data.path()).unwrap();

        assert_eq!(limited, vec!["Germany"]);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let file = json_file(r#"{"cleaning": {"date_formats": []}}"#);
        let path = file.path().to_path_buf();
        assert!(build_salescope(Some(&path), None).is_err());
    }
}
