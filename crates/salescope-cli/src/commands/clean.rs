//! Clean command - run the cleaning pipeline and write the snapshot.

use std::path::PathBuf;

use colored::Colorize;
use salescope::{write_snapshot, CleaningDiagnostics, CleaningSummary};

use super::build_salescope;

pub struct CleanArgs {
    pub file: PathBuf,
    pub country: String,
    pub postal_codes: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_snapshot: bool,
}

pub fn run(args: CleanArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    println!(
        "{} {} {}",
        "Cleaning".cyan().bold(),
        args.file.display().to_string().white(),
        format!("({})", args.country).dimmed()
    );

    let salescope = build_salescope(args.config.as_ref(), args.postal_codes.as_ref())?;
    let (table, source) = salescope.load(&args.file)?;
    let result = salescope.clean(&table, &args.country)?;

    if verbose {
        println!(
            "  {} {}, {} rows, {} columns",
            "Source:".dimmed(),
            source.format,
            source.row_count,
            source.column_count
        );
    }

    println!();
    print_diagnostics(&result.diagnostics, verbose);
    println!();
    print_summary(&result.summary);

    let warnings = result.diagnostics.warnings();
    if !warnings.is_empty() {
        println!();
        println!("{}", "Warnings:".yellow().bold());
        for warning in &warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
    }

    if args.no_snapshot {
        return Ok(());
    }

    let dir = args.output_dir.unwrap_or_else(|| PathBuf::from("."));
    let path = write_snapshot(&dir, &args.country, &result.table)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        path.display().to_string().white()
    );

    Ok(())
}

fn print_diagnostics(diagnostics: &CleaningDiagnostics, verbose: bool) {
    println!("{}", "Cleaning:".yellow().bold());
    println!(
        "  Rows:               {} of {}",
        diagnostics.filtered_rows.to_string().white().bold(),
        diagnostics.input_rows
    );
    println!(
        "  Duplicates removed: {}",
        diagnostics.duplicates_removed.to_string().white()
    );
    if diagnostics.duplicates_after_cleaning > 0 {
        println!(
            "  Collapsed copies:   {}",
            diagnostics.duplicates_after_cleaning.to_string().white()
        );
    }
    println!(
        "  Cells filled:       {} ({} left empty)",
        diagnostics.cells_filled.to_string().white(),
        diagnostics.cells_still_missing
    );

    let invalid = diagnostics.invalid_dates();
    let invalid_text = if invalid > 0 {
        invalid.to_string().red()
    } else {
        invalid.to_string().green()
    };
    println!("  Invalid dates:      {}", invalid_text);
    println!(
        "  Outliers replaced:  {}",
        diagnostics.outliers_replaced().to_string().white()
    );
    println!(
        "  Postal codes:       {} found, {} missing",
        diagnostics.rows_with_postal_code.to_string().green(),
        diagnostics.rows_without_postal_code.to_string().yellow()
    );

    if verbose {
        for report in &diagnostics.outliers {
            match report.bounds {
                Some(bounds) => println!(
                    "    {:16} [{:.2}, {:.2}] median {:.2}, {} replaced",
                    report.column, bounds.lower, bounds.upper, bounds.median, report.replaced
                ),
                None => println!("    {:16} no numeric values", report.column),
            }
        }
    }
}

fn print_summary(summary: &CleaningSummary) {
    println!("{}", "Summary:".yellow().bold());
    println!(
        "  Total orders:       {}",
        summary.total_orders.to_string().white().bold()
    );
    println!("  Total sales:        {:.2}", summary.total_sales);
    println!("  Total profit:       {:.2}", summary.total_profit);
    println!("  Customers:          {}", summary.distinct_customers);
    match summary.average_delivery_time {
        Some(days) => println!("  Avg delivery time:  {:.2} days", days),
        None => println!("  Avg delivery time:  {}", "n/a".dimmed()),
    }
}
