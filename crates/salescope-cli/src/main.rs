//! Salescope CLI - country-level sales data cleaning.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Countries { file, config } => {
            commands::countries::run(file, config, cli.verbose)
        }

        Commands::Clean {
            file,
            country,
            postal_codes,
            output_dir,
            config,
            no_snapshot,
        } => commands::clean::run(
            commands::clean::CleanArgs {
                file,
                country,
                postal_codes,
                output_dir,
                config,
                no_snapshot,
            },
            cli.verbose,
        ),

        Commands::Report {
            file,
            country,
            json,
            output,
            top,
            postal_codes,
            config,
        } => commands::report::run(
            commands::report::ReportArgs {
                file,
                country,
                json,
                output,
                top,
                postal_codes,
                config,
            },
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
