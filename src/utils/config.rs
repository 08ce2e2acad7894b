//! Configuration and constants for the CLI.

use super::error::ConfigError;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the synthetic top-level method a rootless call-key maps to
pub const ROOT_METHOD: &str = "main()";

/// Separator between caller and callee inside a call-key
pub const KEY_SEPARATOR: &str = "==>";

/// Percentile reported for wall time unless configured otherwise
pub const DEFAULT_PERCENTILE: f64 = 0.90;

/// Below this many observations the percentile is reported as undefined
pub const MIN_PERCENTILE_SAMPLES: usize = 50;

/// Default cap on the number of samples read from a source
pub const DEFAULT_SAMPLE_LIMIT: usize = 300;

/// Default number of methods listed by the summary command
pub const DEFAULT_TOP_METHODS: usize = 20;

/// Prompt shown by the interactive navigator
pub const COMMAND_PROMPT: &str = "command (q|0 - go back|1|2|3|...|m1|m2|m3|...) > ";

/// Optional settings read from a TOML file
///
/// Every field may be omitted; command-line flags take precedence.
///
/// ```toml
/// input = "samples.jsonl"
/// limit = 300
/// percentile = 0.9
/// top = 20
/// compressed = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// JSON-lines file or directory of JSON samples
    pub input: Option<PathBuf>,

    /// Maximum number of samples to read
    pub limit: Option<usize>,

    /// Percentile of wall time to estimate, in (0, 1)
    pub percentile: Option<f64>,

    /// Methods listed by `summary`
    pub top: Option<usize>,

    /// Samples are zlib-compressed JSON
    pub compressed: Option<bool>,
}

impl ConsoleConfig {
    /// Fill unset fields of `self` from `other`
    pub fn or(self, other: ConsoleConfig) -> ConsoleConfig {
        ConsoleConfig {
            input: self.input.or(other.input),
            limit: self.limit.or(other.limit),
            percentile: self.percentile.or(other.percentile),
            top: self.top.or(other.top),
            compressed: self.compressed.or(other.compressed),
        }
    }

    /// Resolve into concrete settings, applying defaults
    ///
    /// # Errors
    /// * `ConfigError::Invalid` - no input path, zero limit, or percentile outside (0, 1)
    pub fn resolve(self) -> Result<Settings, ConfigError> {
        let input = self
            .input
            .ok_or_else(|| ConfigError::Invalid("no input path given".to_string()))?;

        let limit = self.limit.unwrap_or(DEFAULT_SAMPLE_LIMIT);
        if limit == 0 {
            return Err(ConfigError::Invalid("limit must be greater than 0".to_string()));
        }

        let percentile = self.percentile.unwrap_or(DEFAULT_PERCENTILE);
        if !(percentile > 0.0 && percentile < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "percentile must be between 0 and 1 (exclusive), got {}",
                percentile
            )));
        }

        Ok(Settings {
            input,
            limit,
            percentile,
            top: self.top.unwrap_or(DEFAULT_TOP_METHODS),
            compressed: self.compressed.unwrap_or(false),
        })
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub limit: usize,
    pub percentile: f64,
    pub top: usize,
    pub compressed: bool,
}

/// Load settings from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::TomlError` - If TOML is invalid
pub fn load_config(path: impl AsRef<Path>) -> Result<ConsoleConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: ConsoleConfig = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "input = \"samples.jsonl\"\nlimit = 10\npercentile = 0.95\ncompressed = true"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.input, Some(PathBuf::from("samples.jsonl")));
        assert_eq!(config.limit, Some(10));
        assert_eq!(config.percentile, Some(0.95));
        assert_eq!(config.top, None);
        assert_eq!(config.compressed, Some(true));
    }

    #[test]
    fn test_load_config_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sql = \"select perfdata from details\"").unwrap();

        assert!(matches!(load_config(file.path()), Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_cli_values_take_precedence() {
        let cli = ConsoleConfig {
            limit: Some(5),
            ..Default::default()
        };
        let file = ConsoleConfig {
            input: Some(PathBuf::from("from_file.jsonl")),
            limit: Some(500),
            ..Default::default()
        };

        let settings = cli.or(file).resolve().unwrap();
        assert_eq!(settings.input, PathBuf::from("from_file.jsonl"));
        assert_eq!(settings.limit, 5);
        assert_eq!(settings.percentile, DEFAULT_PERCENTILE);
        assert_eq!(settings.top, DEFAULT_TOP_METHODS);
        assert!(!settings.compressed);
    }

    #[test]
    fn test_resolve_requires_input() {
        assert!(matches!(
            ConsoleConfig::default().resolve(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_percentile() {
        for p in [0.0, 1.0, 1.5, -0.1] {
            let config = ConsoleConfig {
                input: Some(PathBuf::from("x")),
                percentile: Some(p),
                ..Default::default()
            };
            assert!(config.resolve().is_err(), "percentile {} accepted", p);
        }
    }
}
