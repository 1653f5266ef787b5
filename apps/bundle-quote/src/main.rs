//! # bundle-quote
//!
//! Prices a telecom bundle from a quote file and prints the month-by-month
//! projection.
//!
//! ## Usage
//! ```bash
//! # JSON output (default)
//! cargo run -p bundle-quote -- quote.json
//!
//! # Table output over two years, as of a fixed date
//! cargo run -p bundle-quote -- --format text --months 24 --date 2025-10-27 quote.json
//!
//! # Promotions running on a date
//! cargo run -p bundle-quote -- --list-promotions --date 2025-06-01 catalog.json
//!
//! # More logging
//! RUST_LOG=pricing_core=trace cargo run -p bundle-quote -- quote.json
//! ```
//!
//! Logs go to stderr so stdout stays parseable.

mod args;
mod config;
mod error;
mod quote;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use args::{Args, Command, USAGE};
use config::{LogSettings, QuoteConfig};
use error::QuoteResult;
use quote::QuoteDocument;

fn main() -> ExitCode {
    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!();
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let args = match command {
        Command::Help => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Command::Quote(args) => args,
    };

    let bootstrap_filter = env_filter(&LogSettings::default().filter);
    let config = match load_config(args.config.clone(), bootstrap_filter, std::io::stderr) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.filter);

    match run(&args, &config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Quote failed");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &QuoteConfig) -> QuoteResult<String> {
    let document = QuoteDocument::from_file(&args.quote_file)?;
    let format = args.format.unwrap_or(config.output.format);

    if args.list_promotions {
        info!(file = ?args.quote_file, %format, "Listing active promotions");
        let active = document.active_promotions(args, Utc::now());
        return render::render_promotions(&active, format, config.output.pretty);
    }

    info!(file = ?args.quote_file, %format, "Pricing bundle");
    let calculation = document.price(args, config, Utc::now())?;
    render::render(&calculation, format, config.output.pretty)
}

/// Loads configuration under a temporary subscriber.
///
/// The real subscriber needs `log.filter` from the loaded config, so events
/// raised while loading (file path, ignored env overrides) go through this
/// one instead of being dropped.
fn load_config<W>(path: Option<PathBuf>, filter: EnvFilter, writer: W) -> QuoteResult<QuoteConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish();

    tracing::subscriber::with_default(bootstrap, || QuoteConfig::load(path))
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pricing_core=trace` - Trace rule evaluation only
/// - Default: `log.filter` from the config
fn init_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .with_writer(std::io::stderr)
        .init();
}
