//! Report command - print or save the aggregate tables.

use std::path::PathBuf;

use colored::Colorize;
use salescope::report::GroupTable;
use salescope::save_report;

use super::build_salescope;

pub struct ReportArgs {
    pub file: PathBuf,
    pub country: String,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub top: usize,
    pub postal_codes: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn run(args: ReportArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ReportArgs {
        file,
        country,
        json,
        output,
        top,
        postal_codes,
        config,
    } = args;

    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let salescope = build_salescope(config.as_ref(), postal_codes.as_ref())?;
    let result = salescope.analyze(&file, &country)?;

    if let Some(ref path) = output {
        save_report(path, &result)?;
    }

    if json {
        let document = serde_json::json!({
            "country": country,
            "summary": result.cleaning.summary,
            "report": result.report,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Report for".cyan().bold(),
        country.white().bold(),
        format!("({} rows)", result.cleaning.table.row_count()).dimmed()
    );

    if verbose {
        println!(
            "  {} {}, {} rows, {} columns, sha256 {}",
            "Source:".dimmed(),
            result.source.format,
            result.source.row_count,
            result.source.column_count,
            result.source.hash
        );
        for warning in result.cleaning.diagnostics.warnings() {
            println!("  {} {}", "!".yellow(), warning);
        }
    }

    for (title, table) in result.report.tables() {
        println!();
        print_table(title, table, top);
    }

    println!();
    println!("{}", "Monthly trend:".yellow().bold());
    if result.report.monthly.is_empty() {
        println!("  {}", "no dated orders".dimmed());
    }
    for bucket in &result.report.monthly {
        println!(
            "  {}  sales {:>12.2}  profit {:>10.2}  quantity {:>6}  orders {:>5}",
            bucket.month_end, bucket.sales, bucket.profit, bucket.quantity, bucket.orders
        );
    }

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn print_table(title: &str, table: &GroupTable, top: usize) {
    println!("{}", format!("{}:", title).yellow().bold());
    if table.is_empty() {
        println!("  {}", "no rows".dimmed());
        return;
    }

    let headers = table.headers();
    let key_width = table
        .rows
        .iter()
        .map(|r| r.key.join(" / ").len())
        .max()
        .unwrap_or(0)
        .max(table.keys.len() * 8);

    let key_header = headers[..table.keys.len()].join(" / ");
    let value_headers: Vec<String> = headers[table.keys.len()..]
        .iter()
        .map(|h| format!("{:>16}", h))
        .collect();
    println!(
        "  {:width$} {}",
        key_header.dimmed(),
        value_headers.join(" ").dimmed(),
        width = key_width
    );

    for row in table.rows.iter().take(top) {
        let values: Vec<String> = row
            .values
            .iter()
            .map(|v| match v {
                Some(v) => format!("{:>16.2}", v),
                None => format!("{:>16}", "-"),
            })
            .collect();
        println!(
            "  {:width$} {}",
            row.key.join(" / "),
            values.join(" "),
            width = key_width
        );
    }

    if table.rows.len() > top {
        println!(
            "  {}",
            format!("... {} more", table.rows.len() - top).dimmed()
        );
    }
}
