//! Integration tests for salescope.

use std::fs;
use std::io::Write;

use tempfile::NamedTempFile;

use salescope::clean::CleaningPipeline;
use salescope::report::{Aggregate, Measure};
use salescope::{
    save_report, write_snapshot, Parser, PostalLookup, SalescopeError, Salescope,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

const HEADER: &str = "Order ID,Order Date,Ship Date,Customer ID,Segment,City,Country,Category,Sub-Category,Sales,Quantity,Discount,Profit,Shipping Cost,Order Priority,Ship Mode";

fn dataset(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn test_duplicate_berlin_rows_collapse() {
    let content = dataset(&[
        "DE-1,2023-01-01,2023-01-05,C1,Consumer,Berlin,Germany,Technology,Phones,100,2,0,20,5,High,Standard Class",
        "DE-1,2023-01-01,2023-01-05,C1,Consumer,Berlin,Germany,Technology,Phones,100,2,0,20,5,High,Standard Class",
        "FR-1,2023-01-01,2023-01-03,C2,Consumer,Paris,France,Technology,Phones,80,1,0,10,3,Low,First Class",
    ]);
    let file = create_test_file(&content);

    let result = Salescope::new()
        .analyze(file.path(), "Germany")
        .expect("Analysis failed");
    let table = &result.cleaning.table;

    assert_eq!(table.row_count(), 1);
    assert_eq!(result.cleaning.diagnostics.duplicates_removed, 1);
    assert_eq!(table.column_by_name("Postal Code").unwrap(), vec!["10115"]);
    assert_eq!(table.column_by_name("Delivery Time").unwrap(), vec!["4"]);
    assert_eq!(result.cleaning.summary.average_delivery_time, Some(4.0));
    assert_eq!(result.cleaning.summary.total_sales, 100.0);
    assert_eq!(result.cleaning.summary.distinct_customers, 1);
}

#[test]
fn test_extreme_sales_value_replaced_by_median() {
    let content = dataset(&[
        "DE-1,2023-01-01,2023-01-02,C1,Consumer,Bonn,Germany,Furniture,Chairs,10,1,0,1,1,High,Standard Class",
        "DE-2,2023-01-01,2023-01-02,C1,Consumer,Bonn,Germany,Furniture,Chairs,12,1,0,1,1,High,Standard Class",
        "DE-3,2023-01-01,2023-01-02,C1,Consumer,Bonn,Germany,Furniture,Chairs,11,1,0,1,1,High,Standard Class",
        "DE-4,2023-01-01,2023-01-02,C1,Consumer,Bonn,Germany,Furniture,Chairs,13,1,0,1,1,High,Standard Class",
        "DE-5,2023-01-01,2023-01-02,C1,Consumer,Bonn,Germany,Furniture,Chairs,1000,1,0,1,1,High,Standard Class",
    ]);
    let file = create_test_file(&content);

    let result = Salescope::new()
        .analyze(file.path(), "Germany")
        .expect("Analysis failed");

    assert_eq!(
        result.cleaning.table.column_by_name("Sales").unwrap(),
        vec!["10", "12", "11", "13", "12"]
    );

    let sales = result
        .cleaning
        .diagnostics
        .outliers
        .iter()
        .find(|o| o.column == "Sales")
        .unwrap();
    let bounds = sales.bounds.unwrap();
    assert_eq!(bounds.median, 12.0);
    assert!(bounds.upper < 1000.0);
    assert_eq!(sales.replaced, 1);

    // Constant columns have a zero-width fence and nothing to replace
    let quantity = result
        .cleaning
        .diagnostics
        .outliers
        .iter()
        .find(|o| o.column == "Quantity")
        .unwrap();
    assert_eq!(quantity.replaced, 0);
}

#[test]
fn test_one_unparseable_order_date() {
    let content = dataset(&[
        "DE-1,2023-01-01,2023-01-02,C1,Consumer,Bonn,Germany,Furniture,Chairs,10,1,0,1,1,High,Standard Class",
        "DE-2,2023-01-01,2023-01-03,C2,Consumer,Bonn,Germany,Furniture,Chairs,10,1,0,1,1,High,Standard Class",
        "DE-3,yesterday,2023-01-04,C3,Consumer,Bonn,Germany,Furniture,Chairs,10,1,0,1,1,High,Standard Class",
        "DE-4,2023-01-01,2023-01-04,C4,Consumer,Bonn,Germany,Furniture,Chairs,10,1,0,1,1,High,Standard Class",
        "DE-5,2023-01-01,2023-01-05,C5,Consumer,Bonn,Germany,Furniture,Chairs,10,1,0,1,1,High,Standard Class",
    ]);
    let file = create_test_file(&content);

    let result = Salescope::new()
        .analyze(file.path(), "Germany")
        .expect("Analysis failed");
    let diagnostics = &result.cleaning.diagnostics;

    assert_eq!(diagnostics.order_dates.unparseable, 1);
    assert_eq!(diagnostics.invalid_dates(), 1);
    assert_eq!(diagnostics.undefined_delivery_times, 1);
    assert_eq!(diagnostics.warnings().len(), 1);
    // (1 + 2 + 3 + 4) / 4
    assert_eq!(result.cleaning.summary.average_delivery_time, Some(2.5));
    assert_eq!(
        result.cleaning.table.column_by_name("Delivery Time").unwrap(),
        vec!["1", "2", "", "3", "4"]
    );
}

#[test]
fn test_missing_country_column_refuses_to_run() {
    let file = create_test_file("City,Sales\nBerlin,10\n");

    let err = Salescope::new().analyze(file.path(), "Germany").unwrap_err();

    assert!(matches!(err, SalescopeError::MissingColumn { .. }));
    assert!(err.to_string().contains("Country"));
}

#[test]
fn test_forward_fill_then_postal_lookup() {
    let content = dataset(&[
        "DE-1,2023-01-01,2023-01-02,C1,Consumer,Leipzig,Germany,Furniture,Chairs,10,1,0,1,1,High,Standard Class",
        "DE-2,2023-01-01,2023-01-02,C1,Consumer,,Germany,Furniture,Chairs,11,1,0,1,1,High,Standard Class",
        "DE-3,2023-01-01,2023-01-02,C1,Consumer,Atlantis,Germany,Furniture,Chairs,12,1,0,1,1,High,Standard Class",
    ]);
    let file = create_test_file(&content);

    let result = Salescope::new()
        .analyze(file.path(), "Germany")
        .expect("Analysis failed");
    let table = &result.cleaning.table;

    assert_eq!(
        table.column_by_name("City").unwrap(),
        vec!["Leipzig", "Leipzig", "Atlantis"]
    );
    assert_eq!(
        table.column_by_name("Postal Code").unwrap(),
        vec!["04103", "04103", ""]
    );
    assert_eq!(result.cleaning.diagnostics.rows_with_postal_code, 2);
    assert_eq!(result.cleaning.diagnostics.rows_without_postal_code, 1);
}

// =============================================================================
// Snapshot and report output
// =============================================================================

#[test]
fn test_cleaning_a_snapshot_is_idempotent() {
    let content = dataset(&[
        "DE-1,2023-01-01,2023-01-05,C1,Consumer,Berlin,Germany,Technology,Phones,10,1,0.1,1,,High,Standard Class",
        "DE-1,2023-01-01,2023-01-05,C1,Consumer,Berlin,Germany,Technology,Phones,10,1,0.1,1,,High,Standard Class",
        "DE-2,01/02/2023,01/04/2023,C2,Corporate,Bonn,Germany,Furniture,Chairs,12,1,0.1,2,3,Low,First Class",
        "DE-3,2023-01-03,2023-01-08,C3,Consumer,Hamburg,Germany,Technology,Copiers,11,2,0.2,3,4,High,Same Day",
        "DE-4,garbage,2023-02-02,C1,Home Office,Munich,Germany,Office Supplies,Paper,13,2,0.2,4,5,Medium,Standard Class",
        "DE-5,2023-02-03,2023-02-06,C4,Consumer,Berlin,Germany,Technology,Phones,1000,3,0.1,5,6,High,Second Class",
        "FR-1,2023-02-03,2023-02-06,C9,Consumer,Paris,France,Technology,Phones,70,3,0.1,5,6,High,Second Class",
    ]);
    let file = create_test_file(&content);
    let salescope = Salescope::new();

    let first = salescope.analyze(file.path(), "Germany").unwrap();
    let first_dir = tempfile::tempdir().unwrap();
    let first_path = write_snapshot(first_dir.path(), "Germany", &first.cleaning.table).unwrap();

    let second = salescope.analyze(&first_path, "Germany").unwrap();
    let second_dir = tempfile::tempdir().unwrap();
    let second_path =
        write_snapshot(second_dir.path(), "Germany", &second.cleaning.table).unwrap();

    assert_eq!(first.cleaning.diagnostics.order_dates.unparseable, 1);
    assert_eq!(second.cleaning.diagnostics.order_dates.missing, 1);
    assert_eq!(second.cleaning.diagnostics.duplicates_removed, 0);
    assert_eq!(second.cleaning.diagnostics.outliers_replaced(), 0);
    assert_eq!(
        second.cleaning.table.column_by_name("Delivery Time").unwrap(),
        vec!["4", "2", "5", "", "3"]
    );
    assert_eq!(
        fs::read(&first_path).unwrap(),
        fs::read(&second_path).unwrap()
    );
}

#[test]
fn test_snapshot_header_and_name() {
    let content = dataset(&[
        "DE-1,2023-01-01,2023-01-05,C1,Consumer,Berlin,Germany,Technology,Phones,100,2,0,20,5,High,Standard Class",
    ]);
    let file = create_test_file(&content);
    let result = Salescope::new().analyze(file.path(), "Germany").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(dir.path(), "Germany", &result.cleaning.table).unwrap();

    assert_eq!(path.file_name().unwrap(), "Updated_Germany_data.csv");
    let text = fs::read_to_string(&path).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(header, format!("{},Delivery Time,Postal Code", HEADER));
}

#[test]
fn test_save_report_json() {
    let content = dataset(&[
        "DE-1,2023-01-01,2023-01-05,C1,Consumer,Berlin,Germany,Technology,Phones,100,2,0,20,5,High,Standard Class",
        "DE-2,2023-03-01,2023-03-02,C2,Corporate,Bonn,Germany,Furniture,Chairs,50,1,0,-5,2,Low,First Class",
    ]);
    let file = create_test_file(&content);
    let result = Salescope::new().analyze(file.path(), "Germany").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports/germany.json");
    save_report(&path, &result).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["summary"]["total_orders"], 2);
    assert_eq!(json["diagnostics"]["country"], "Germany");
    assert_eq!(json["report"]["monthly"].as_array().unwrap().len(), 3);
    assert!(json.get("table").is_none());
}

// =============================================================================
// Aggregations
// =============================================================================

#[test]
fn test_report_tables_from_cleaned_rows() {
    let content = dataset(&[
        "DE-1,2023-01-01,2023-01-05,C1,Consumer,Berlin,Germany,Technology,Phones,100,2,0,20,5,High,Standard Class",
        "DE-2,2023-01-02,2023-01-05,C2,Corporate,Bonn,Germany,Furniture,Chairs,50,1,0,-5,2,Low,First Class",
        "DE-3,2023-01-03,2023-01-05,C1,Consumer,Bonn,Germany,Furniture,Tables,90,3,0,10,4,High,Standard Class",
    ]);
    let file = create_test_file(&content);
    let result = Salescope::new().analyze(file.path(), "Germany").unwrap();
    let report = &result.report;

    let cities: Vec<&str> = report
        .city_sales
        .rows
        .iter()
        .map(|r| r.key[0].as_str())
        .collect();
    assert_eq!(cities, vec!["Bonn", "Berlin"]);

    assert_eq!(
        report
            .by_segment
            .value(&["Consumer"], Aggregate::Sum(Measure::Sales)),
        Some(190.0)
    );
    assert_eq!(
        report.by_segment.value(&["Consumer"], Aggregate::CountOrders),
        Some(2.0)
    );
    assert_eq!(
        report
            .by_order_priority
            .value(&["High"], Aggregate::Mean(Measure::ShippingCost)),
        Some(4.5)
    );
    assert_eq!(
        report
            .category_sales
            .value(&["Furniture"], Aggregate::Sum(Measure::Sales)),
        Some(140.0)
    );
    assert_eq!(report.monthly.len(), 1);
    assert_eq!(report.monthly[0].quantity, 6.0);
}

#[test]
fn test_pipeline_on_in_memory_table() {
    let table = Parser::new()
        .parse_str("Country;City;Sales\nGermany;Celle;5\nGermany;Celle;5\n")
        .unwrap();
    let lookup = PostalLookup::from_pairs([("Celle", "29221-29229")]);

    let result = CleaningPipeline::new()
        .clean(&table, "Germany", &lookup)
        .unwrap();

    assert_eq!(result.table.row_count(), 1);
    assert_eq!(result.table.column_by_name("Postal Code").unwrap(), vec!["29221"]);
    assert_eq!(result.summary.average_delivery_time, None);
}
