//! Quality-Power CLI
//!
//! Hashes the current time, scores the digest at a bit width, and estimates
//! the bit width back from that score.
//!
//! # Output
//!
//! One `key=value` line each for `BITS`, `SAMPLES`, `hash`, `quality`, `w`,
//! `N`, `N2` and `N3`. Errors are printed to stdout and exit with status 1.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use qpower::algorithm::{DEFAULT_BITS, DEFAULT_PRECISION_DIGITS, DEFAULT_SAMPLES};
use qpower::config::{Config, OutputFormat};
use qpower::report;

#[derive(Parser)]
#[command(name = "qpower")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "Estimate hash quality and its bit width in extended precision")]
struct Cli {
    /// Bit width used for the initial quality
    #[arg(short, long, default_value_t = DEFAULT_BITS, value_parser = clap::value_parser!(u32).range(1..))]
    bits: u32,

    /// Number of chained samples for the w estimator (at least 16)
    #[arg(short, long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// Working precision in significant decimal digits
    #[arg(short, long, default_value_t = DEFAULT_PRECISION_DIGITS as u32, value_parser = clap::value_parser!(u32).range(1..))]
    precision: u32,

    /// Seed timestamp in unix seconds (default: now)
    #[arg(short, long, allow_hyphen_values = true)]
    timestamp: Option<i64>,

    /// Print one JSON object instead of key=value lines
    #[arg(long)]
    json: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            bits: cli.bits,
            samples: cli.samples,
            precision_digits: cli.precision as usize,
            timestamp: cli.timestamp,
            format: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

/// Parse command-line arguments
///
/// On failure returns the text to print on stdout and the exit status: 0 for
/// `--help` and `--version`, 1 for anything malformed.
fn parse_args<I, T>(args: I) -> Result<Cli, (String, u8)>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        let status = if e.use_stderr() { 1 } else { 0 };
        (e.render().to_string(), status)
    })
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err((text, status)) => {
            println!("{}", text.trim_end());
            return ExitCode::from(status);
        }
    };

    init_logging(cli.verbose);

    let config = Config::from(&cli);
    let mut stdout = io::stdout().lock();
    if let Err(e) = report::run(&config, &mut stdout) {
        let _ = stdout.flush();
        println!("Error: {:#}", e);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
