//! Command-line argument parsing.

use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;

use crate::config::OutputFormat;
use crate::error::{QuoteError, QuoteResult};

pub const USAGE: &str = "\
Bundle Quote - telecom bundle pricing

Usage: bundle-quote [OPTIONS] <QUOTE_FILE>

Options:
  -c, --config <PATH>     Config file (default: platform config dir)
  -f, --format <FORMAT>   Output format: json | text
  -d, --date <DATE>       Calculation date (RFC 3339 or YYYY-MM-DD)
  -m, --months <N>        Projection length in months (1-60)
  -l, --list-promotions   List promotions active on the calculation date
  -h, --help              Show this help message";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quote(Args),
}

/// Parsed options for a quote run. Flags left unset fall back to the
/// quote document, then to the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub date: Option<DateTime<Utc>>,
    pub months: Option<u32>,
    /// List active promotions instead of pricing the request.
    pub list_promotions: bool,
    pub quote_file: PathBuf,
}

impl Command {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> QuoteResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();

        let mut config = None;
        let mut format = None;
        let mut date = None;
        let mut months = None;
        let mut list_promotions = false;
        let mut quote_file = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    config = Some(PathBuf::from(value_for(&args, i)?));
                    i += 1;
                }
                "--format" | "-f" => {
                    format = Some(value_for(&args, i)?.parse()?);
                    i += 1;
                }
                "--date" | "-d" => {
                    date = Some(parse_date(value_for(&args, i)?)?);
                    i += 1;
                }
                "--months" | "-m" => {
                    let raw = value_for(&args, i)?;
                    months = Some(raw.parse().map_err(|_| {
                        QuoteError::InvalidArgs(format!("--months expects a number, got '{}'", raw))
                    })?);
                    i += 1;
                }
                "--list-promotions" | "-l" => list_promotions = true,
                "--help" | "-h" => return Ok(Command::Help),
                flag if flag.starts_with('-') => {
                    return Err(QuoteError::InvalidArgs(format!("Unknown option: {}", flag)));
                }
                path => {
                    if quote_file.is_some() {
                        return Err(QuoteError::InvalidArgs(format!(
                            "Unexpected extra argument: {}",
                            path
                        )));
                    }
                    quote_file = Some(PathBuf::from(path));
                }
            }
            i += 1;
        }

        let quote_file = quote_file
            .ok_or_else(|| QuoteError::InvalidArgs("Missing QUOTE_FILE".to_string()))?;

        Ok(Command::Quote(Args {
            config,
            format,
            date,
            months,
            list_promotions,
            quote_file,
        }))
    }
}

fn value_for(args: &[String], i: usize) -> QuoteResult<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| QuoteError::InvalidArgs(format!("{} requires a value", args[i])))
}

/// Accepts RFC 3339 timestamps or bare dates (midnight UTC).
pub fn parse_date(raw: &str) -> QuoteResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| QuoteError::InvalidArgs(format!("Invalid date: '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(args: &[&str]) -> QuoteResult<Command> {
        Command::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_minimal() {
        let cmd = parse(&["quote.json"]).unwrap();
        assert_eq!(
            cmd,
            Command::Quote(Args {
                config: None,
                format: None,
                date: None,
                months: None,
                list_promotions: false,
                quote_file: PathBuf::from("quote.json"),
            })
        );
    }

    #[test]
    fn test_all_flags() {
        let cmd = parse(&[
            "--format", "text", "-m", "24", "--date", "2025-10-27", "-c", "q.toml", "quote.json",
        ])
        .unwrap();

        let Command::Quote(args) = cmd else {
            panic!("expected a quote command");
        };
        assert_eq!(args.format, Some(OutputFormat::Text));
        assert_eq!(args.months, Some(24));
        assert_eq!(args.date, Some(Utc.with_ymd_and_hms(2025, 10, 27, 0, 0, 0).unwrap()));
        assert_eq!(args.config, Some(PathBuf::from("q.toml")));
        assert!(!args.list_promotions);
    }

    #[test]
    fn test_list_promotions_flag() {
        let Command::Quote(args) = parse(&["-l", "--date", "2025-06-01", "catalog.json"]).unwrap()
        else {
            panic!("expected a quote command");
        };
        assert!(args.list_promotions);
        assert_eq!(args.date, Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["quote.json", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--months"]).is_err());
        assert!(parse(&["--months", "six", "q.json"]).is_err());
        assert!(parse(&["--format", "xml", "q.json"]).is_err());
        assert!(parse(&["--verbose", "q.json"]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_parse_date() {
        let expected = Utc.with_ymd_and_hms(2025, 10, 27, 9, 30, 0).unwrap();
        assert_eq!(parse_date("2025-10-27T10:30:00+01:00").unwrap(), expected);
        assert_eq!(parse_date("2025-10-27T09:30:00Z").unwrap(), expected);
        assert!(parse_date("27/10/2025").is_err());
    }
}
