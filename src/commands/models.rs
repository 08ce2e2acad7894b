use crate::utils::config::{ConsoleConfig, Settings};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Sample input options shared by every command that aggregates
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct InputArgs {
    /// JSON-lines file or directory of JSON samples
    pub input: Option<PathBuf>,

    /// Maximum number of samples to read
    pub limit: Option<usize>,

    /// Wall-time percentile to estimate
    pub percentile: Option<f64>,

    /// Samples are zlib-compressed JSON
    pub compressed: bool,

    /// Optional TOML file supplying defaults for the fields above
    pub config: Option<PathBuf>,
}

impl InputArgs {
    /// Merge with the config file (if any) and apply defaults
    pub fn resolve(&self, top: Option<usize>) -> Result<Settings> {
        let cli = ConsoleConfig {
            input: self.input.clone(),
            limit: self.limit,
            percentile: self.percentile,
            top,
            // An unset flag leaves the config file's choice in place
            compressed: self.compressed.then_some(true),
        };

        let merged = match &self.config {
            Some(path) => {
                let file = crate::utils::config::load_config(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?;
                cli.or(file)
            }
            None => cli,
        };

        merged.resolve().context("Invalid settings")
    }
}

/// Arguments for the explore command
#[derive(Debug, Clone, Default)]
pub struct ExploreArgs {
    pub input: InputArgs,
}

/// Arguments for the summary command
#[derive(Debug, Clone, Default)]
pub struct SummaryArgs {
    pub input: InputArgs,

    /// Number of methods to list
    pub top: Option<usize>,

    /// Print JSON instead of a table
    pub json: bool,
}
