//! Countries command - list the countries available for selection.

use std::path::PathBuf;

use colored::Colorize;

use super::build_salescope;

pub fn run(
    file: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let countries = build_salescope(config.as_ref(), None)?.countries(&file)?;

    if countries.is_empty() {
        println!("{}", "No countries found.".yellow());
        return Ok(());
    }

    if verbose {
        println!(
            "{} {} {}",
            countries.len().to_string().white().bold(),
            "countries in".cyan(),
            file.display()
        );
    }

    for country in &countries {
        println!("{}", country);
    }

    Ok(())
}
