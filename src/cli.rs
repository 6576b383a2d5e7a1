//! Command-line interface components.

use crate::config::HarvestConfig;
use crate::constants::env_vars;
use crate::error::{HarvesterError, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "pharmacode-harvester")]
#[command(about = "Harvest GTIN to PharmaCode pairs from a spreadsheet into a CSV mapping")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the spreadsheet (first sheet is used)
    #[arg(short = 'p', long = "path", value_name = "PATH", env = env_vars::INPUT_PATH)]
    pub input_path: PathBuf,

    /// Zero-based column number holding GTINs
    #[arg(long = "gtin", value_name = "COLUMN", env = env_vars::GTIN_COLUMN)]
    pub gtin_column: usize,

    /// Zero-based column number holding PharmaCodes
    #[arg(long = "phar", value_name = "COLUMN", env = env_vars::PHARMACODE_COLUMN)]
    pub pharmacode_column: usize,

    /// Directory for the output file (defaults to the spreadsheet's directory)
    #[arg(short, long, value_name = "DIR", env = env_vars::OUTPUT_DIR)]
    pub output_dir: Option<PathBuf>,

    /// Skip the interactive confirmation of the parameters
    #[arg(long)]
    pub no_prompt: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Build the run configuration from the parsed arguments
    pub fn to_config(&self) -> HarvestConfig {
        let config = HarvestConfig::new(
            self.input_path.clone(),
            self.gtin_column,
            self.pharmacode_column,
        );
        match &self.output_dir {
            Some(dir) => config.with_output_dir(dir.clone()),
            None => config,
        }
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pharmacode_harvester={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| HarvesterError::Configuration {
            message: format!("Failed to initialise logging: {}", e),
        })?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Log the parameters a run is about to use
pub fn log_parameters(config: &HarvestConfig) {
    info!("Path to input file: {}", config.input_path.display());
    info!("Column number for GTINs: {}", config.gtin_column);
    info!("Column number for PHARs: {}", config.pharmacode_column);
}

/// Interactive confirmation of the run parameters
pub mod parameter_prompt {
    use crate::config::HarvestConfig;
    use anyhow::{Context, Result};
    use colored::*;
    use std::io::{BufRead, Write};
    use std::path::PathBuf;

    /// Show each parameter and let the user keep or replace it
    ///
    /// An empty line, or end of input, keeps the shown value.
    pub fn confirm_parameters<R: BufRead, W: Write>(
        mut config: HarvestConfig,
        input: &mut R,
        output: &mut W,
    ) -> Result<HarvestConfig> {
        let shown_path = config.input_path.display().to_string();
        if let Some(path) = ask(input, output, "Enter path to xlsx file", &shown_path)? {
            config.input_path = PathBuf::from(path);
        }

        let shown_gtin = config.gtin_column.to_string();
        if let Some(column) = ask(input, output, "Enter column number for GTINs", &shown_gtin)? {
            config.gtin_column = parse_column(&column)?;
        }

        let shown_phar = config.pharmacode_column.to_string();
        if let Some(column) = ask(input, output, "Enter column number for PHARs", &shown_phar)? {
            config.pharmacode_column = parse_column(&column)?;
        }

        Ok(config)
    }

    fn ask<R: BufRead, W: Write>(
        input: &mut R,
        output: &mut W,
        label: &str,
        current: &str,
    ) -> Result<Option<String>> {
        write!(output, "{} [{}]: ", label.bright_white(), current.bright_cyan())
            .context("Failed to write prompt")?;
        output.flush().context("Failed to flush stdout")?;

        let mut answer = String::new();
        input
            .read_line(&mut answer)
            .context("Failed to read user input")?;

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }

    fn parse_column(answer: &str) -> Result<usize> {
        answer
            .parse()
            .with_context(|| format!("'{}' is not a valid column number", answer))
    }

}
