//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading raw sample blobs
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read samples: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sample source: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while decoding a single sample
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid sample format: {0}")]
    InvalidFormat(String),

    #[error("Failed to decompress sample: {0}")]
    Decompress(std::io::Error),
}

/// Errors raised by the aggregation engine
#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No samples were read from the source")]
    EmptyPopulation,
}

/// Errors that can occur while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
