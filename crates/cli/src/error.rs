//! Errors raised while loading campaign inputs.

use std::path::PathBuf;

use stampede_types::HexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// File could not be read or written.
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Campaign file is not valid TOML.
    #[error("Failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Manifest file is not valid JSON.
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Workflow name not recognized.
    #[error("Unknown workflow \"{0}\" (expected liquidity-setup, trading, or fund)")]
    UnknownWorkflow(String),

    /// Conflict policy name not recognized.
    #[error("Unknown conflict policy \"{0}\" (expected hot-actor or hot-target)")]
    UnknownPolicy(String),

    /// A duration field could not be parsed.
    #[error("Invalid duration \"{value}\" for {field}: {source}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    /// An address field could not be parsed.
    #[error("Invalid address \"{value}\" in {path}: {source}")]
    InvalidAddress {
        path: PathBuf,
        value: String,
        #[source]
        source: HexError,
    },

    /// Token addresses must come in (base, quote) pairs.
    #[error("Resource manifest {path} lists {count} token addresses, which is not an even number")]
    OddResourceCount { path: PathBuf, count: usize },
}
