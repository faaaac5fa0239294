//! Example: Clean one country of a sales file and print a summary.
//!
//! Usage:
//!   cargo run --example clean -- <file_path> <country>
//!
//! Example:
//!   cargo run --example clean -- data/superstore.csv Germany

use std::env;
use std::path::Path;

use salescope::report::Aggregate;
use salescope::Salescope;

fn main() -> salescope::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example clean -- <file_path> <country>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example clean -- data/superstore.csv Germany");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let country = &args[2];

    if !Path::new(file_path).exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Salescope: {} ({})", file_path, country);
    println!("{}", separator);

    let result = Salescope::new().analyze(file_path, country)?;
    let summary = &result.cleaning.summary;
    let diagnostics = &result.cleaning.diagnostics;

    println!();
    println!("Rows:                {} of {}", diagnostics.output_rows, diagnostics.input_rows);
    println!("Duplicates removed:  {}", diagnostics.duplicates_removed);
    println!("Cells filled:        {}", diagnostics.cells_filled);
    println!("Outliers replaced:   {}", diagnostics.outliers_replaced());
    println!("Total sales:         {:.2}", summary.total_sales);
    println!("Total profit:        {:.2}", summary.total_profit);
    println!("Customers:           {}", summary.distinct_customers);
    match summary.average_delivery_time {
        Some(days) => println!("Avg delivery (days): {:.2}", days),
        None => println!("Avg delivery (days): n/a"),
    }

    for warning in diagnostics.warnings() {
        println!("warning: {}", warning);
    }

    println!();
    println!("Top cities by sales:");
    let top = result.report.city_sales.clone().truncate(5);
    let sales = Aggregate::Sum(salescope::report::Measure::Sales);
    for row in &top.rows {
        let value = top.value(&[row.key[0].as_str()], sales).unwrap_or(0.0);
        println!("  {:<20} {:>12.2}", row.key[0], value);
    }

    Ok(())
}
