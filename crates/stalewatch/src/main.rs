//! Stalewatch CLI - report TODO/FIXME markers whose date has passed.
//!
//! Scans Go and Rust sources for markers such as
//! `// TODO: stale:01-01-2025 expires:01-04-2025 drop the shim` and prints the
//! stale and expired ones.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Exit code for a run that found expired markers under `--fail-on-expired`.
const EXIT_EXPIRED: u8 = 1;

/// Exit code for a run that could not complete.
const EXIT_FATAL: u8 = 2;

/// Stalewatch: find TODO/FIXME markers past their date.
#[derive(Parser)]
#[command(name = "stalewatch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// File or directory to scan; a trailing `/...` is accepted
    #[arg(default_value = ".")]
    path: String,

    /// Reference date (defaults to today), in the configured date format
    #[arg(long, env = "STALEWATCH_DATE", value_name = "DATE")]
    today: Option<String>,

    /// Comma-separated path substrings to skip
    #[arg(long, value_name = "LIST")]
    exclude: Option<String>,

    /// Exit with status 1 when an expired marker is found
    #[arg(long)]
    fail_on_expired: bool,

    /// Days between the stale date and expiry when `expires:` is absent
    #[arg(long, value_name = "N")]
    default_expiry_days: Option<u32>,

    /// chrono strftime pattern for marker dates (default: %d-%m-%Y)
    #[arg(long, value_name = "PATTERN")]
    date_format: Option<String>,

    /// Configuration file (defaults to .stalewatch.yaml in the scan root)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print findings as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = cli.log_level.clone().unwrap_or_else(|| {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string()
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = cli::scan::ScanOptions {
        path: cli.path,
        today: cli.today,
        exclude: cli.exclude,
        fail_on_expired: cli.fail_on_expired,
        default_expiry_days: cli.default_expiry_days,
        date_format: cli.date_format,
        config: cli.config,
        json: cli.json,
    };

    match cli::scan::run(&options) {
        Ok(outcome) if outcome.should_fail() => ExitCode::from(EXIT_EXPIRED),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::from(EXIT_FATAL)
        }
    }
}
