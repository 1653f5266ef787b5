//! # Quote Configuration
//!
//! Defaults for the quoting tool.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, see args.rs)                 │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     BUNDLE_QUOTE_DURATION_MONTHS=24                                    │
//! │     BUNDLE_QUOTE_FORMAT=text                                           │
//! │     BUNDLE_QUOTE_LOG=debug                                             │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or the platform config dir:                         │
//! │     ~/.config/bundle-quote/quote.toml (Linux)                          │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [quote]
//! default_duration_months = 24
//!
//! [output]
//! format = "text"   # json | text
//! pretty = true
//!
//! [log]
//! filter = "info,pricing_core=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use pricing_core::validation::validate_duration_months;
use pricing_core::DEFAULT_DURATION_MONTHS;

use crate::error::{QuoteError, QuoteResult};

// =============================================================================
// Output Format
// =============================================================================

/// How the calculation is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// The full `BundleCalculation` as JSON.
    #[default]
    Json,
    /// A month table plus summary for humans.
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "table" => Ok(OutputFormat::Text),
            other => Err(QuoteError::InvalidArgs(format!(
                "Unknown output format: '{}'. Valid options: json, text",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Quoting defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Projection length when neither the request nor the flags set one.
    #[serde(default = "default_duration_months")]
    pub default_duration_months: u32,
}

fn default_duration_months() -> u32 {
    DEFAULT_DURATION_MONTHS
}

impl Default for QuoteSettings {
    fn default() -> Self {
        QuoteSettings {
            default_duration_months: default_duration_months(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

/// Logging settings. `RUST_LOG` still wins when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,pricing_core=debug".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub quote: QuoteSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub log: LogSettings,
}

impl QuoteConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (quote.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> QuoteResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading quote config from file");
                config = Self::from_file(&path)?;
            } else if explicit {
                return Err(QuoteError::InvalidArgs(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> QuoteResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> QuoteResult<()> {
        validate_duration_months(self.quote.default_duration_months).map_err(|e| {
            QuoteError::InvalidConfig(format!("quote.default_duration_months: {}", e))
        })?;

        if self.log.filter.trim().is_empty() {
            return Err(QuoteError::InvalidConfig("log.filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(months) = lookup("BUNDLE_QUOTE_DURATION_MONTHS") {
            match months.parse::<u32>() {
                Ok(m) => {
                    debug!(months = m, "Overriding default duration from environment");
                    self.quote.default_duration_months = m;
                }
                Err(_) => warn!(value = %months, "Ignoring non-numeric BUNDLE_QUOTE_DURATION_MONTHS"),
            }
        }

        if let Some(format) = lookup("BUNDLE_QUOTE_FORMAT") {
            match format.parse() {
                Ok(parsed) => self.output.format = parsed,
                Err(_) => warn!(format = %format, "Unknown output format in environment"),
            }
        }

        if let Some(filter) = lookup("BUNDLE_QUOTE_LOG") {
            self.log.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bundle", "bundle-quote")
            .map(|dirs| dirs.config_dir().join("quote.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = QuoteConfig::default();
        assert_eq!(config.quote.default_duration_months, 12);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: QuoteConfig = toml::from_str(
            r#"
            [output]
            format = "text"
            "#,
        )
        .unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.pretty);
        assert_eq!(config.quote.default_duration_months, 12);
    }

    #[test]
    fn test_validation() {
        let mut config = QuoteConfig::default();
        config.quote.default_duration_months = 0;
        assert!(matches!(config.validate(), Err(QuoteError::InvalidConfig(_))));

        config.quote.default_duration_months = 60;
        config.log.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BUNDLE_QUOTE_DURATION_MONTHS", "24"),
            ("BUNDLE_QUOTE_FORMAT", "text"),
            ("BUNDLE_QUOTE_LOG", "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = QuoteConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.quote.default_duration_months, 24);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = QuoteConfig::default();
        config.apply_overrides(|key| match key {
            "BUNDLE_QUOTE_DURATION_MONTHS" => Some("many".to_string()),
            "BUNDLE_QUOTE_FORMAT" => Some("xml".to_string()),
            _ => None,
        });
        assert_eq!(config.quote.default_duration_months, 12);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = QuoteConfig::load(Some(PathBuf::from("/nonexistent/quote.toml")));
        assert!(matches!(result, Err(QuoteError::InvalidArgs(_))));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&QuoteConfig::default()).unwrap();
        assert!(toml_str.contains("[quote]"));
        assert!(toml_str.contains("[output]"));
    }
}
