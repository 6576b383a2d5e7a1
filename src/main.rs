use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use colored::*;
use pharmacode_harvester::cli::{Args, log_parameters, parameter_prompt, setup_logging};
use pharmacode_harvester::constants::{EXIT_FAILURE, EXIT_MISSING_PARAMETERS};
use pharmacode_harvester::{HarvestStats, Harvester};
use std::io;
use std::process;
use tracing::error;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            eprintln!("{}", e);
            eprintln!(
                "Missing parameters. The harvester needs three parameters to operate. Aborting..."
            );
            process::exit(EXIT_MISSING_PARAMETERS);
        }
        Err(e) => e.exit(),
    };

    if let Err(e) = setup_logging(&args) {
        eprintln!("Error: {}", e);
        process::exit(EXIT_FAILURE);
    }

    match run(&args) {
        Ok(stats) => {
            if !args.quiet {
                print_summary(&stats);
            }
            process::exit(0);
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(EXIT_FAILURE);
        }
    }
}

fn run(args: &Args) -> Result<HarvestStats> {
    let mut config = args.to_config();

    if !args.no_prompt {
        let stdin = io::stdin();
        config = parameter_prompt::confirm_parameters(config, &mut stdin.lock(), &mut io::stdout())?;
    }
    log_parameters(&config);

    let harvester = Harvester::new(config).context("Invalid harvest parameters")?;
    let stats = harvester.run().context("Harvest failed")?;

    Ok(stats)
}

fn print_summary(stats: &HarvestStats) {
    println!("{}", "Harvest complete".bright_green().bold());
    println!(
        "  {} {}",
        "Rows read:".bright_cyan(),
        stats.rows_read.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Pairs written:".bright_cyan(),
        stats.pairs_written.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        stats.output_path.display()
    );
    println!(
        "  {} {} ms",
        "Elapsed:".bright_cyan(),
        stats.processing_time_ms
    );
}
