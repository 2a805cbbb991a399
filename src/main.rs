//! Coroutines - CLI
//!
//! Runs the built-in self-test suite.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use coroutines::util::config::{load_config, load_user_config, AutotestConfig};
use coroutines::util::logger::{self, LogLevel};
use coroutines::{autotest, NAME, VERSION};

/// Synchronously driven routines and generators
#[derive(Parser, Debug)]
#[command(name = "coroutines")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the self-test suite
    Autotest {
        /// Config file (defaults to the user config)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Minimum log level
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Also write the log to this file
        #[arg(long, value_name = "FILE")]
        log_file: Option<PathBuf>,

        /// Do not log to stdout
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        eprintln!("{} version: {}", NAME, VERSION);
        eprintln!("Host: {}", std::env::consts::OS);
    }

    match args.command {
        Commands::Autotest {
            config,
            log_level,
            log_file,
            quiet,
        } => {
            let mut settings = match &config {
                Some(path) => load_config(path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
                None => load_user_config().context("Failed to load user config")?,
            };
            settings.apply_env().context("Bad environment override")?;
            apply_cli(&mut settings, log_level, log_file, quiet);

            logger::init_with_config(&settings.log).context("Failed to set up logging")?;
            debug!(?settings, "autotest starting");

            autotest::run_all()?;
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(())
}

fn apply_cli(
    settings: &mut AutotestConfig,
    log_level: Option<LogLevel>,
    log_file: Option<PathBuf>,
    quiet: bool,
) {
    if let Some(level) = log_level {
        settings.log.level = level;
    }
    if let Some(file) = log_file {
        settings.log.file = Some(file);
    }
    if quiet {
        settings.log.stdout = false;
    }
}
