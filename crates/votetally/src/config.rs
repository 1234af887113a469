use std::env;

use thiserror::Error;
use tracing::Level;
use votetally_core::tally::VoteTypes;

/// Errors raised while reading configuration at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid logging level: {0}")]
    InvalidLogLevel(String),
    #[error("{0} does not name any vote type")]
    NoVoteTypes(&'static str),
}

/// Function configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log verbosity (default: INFO)
    pub logging_level: Level,
    /// Name of the votes table
    pub votes_table_name: String,
    /// Partition-key attribute of the votes table
    pub votes_table_partition_key: String,
    /// Sort-key attribute of the votes table, if it has one
    pub votes_table_sort_key: Option<String>,
    /// Accepted vote types, uppercase
    pub valid_vote_types: VoteTypes,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LOGGING_LEVEL` - Log verbosity (default: INFO)
    /// - `VOTES_TABLE_NAME` - Votes table name (required)
    /// - `VOTES_TABLE_PARTITION_KEY` - Partition-key attribute (required)
    /// - `VOTES_TABLE_SORT_KEY` - Sort-key attribute (optional)
    /// - `VALID_VOTE_TYPES` - Comma-separated vote types (required)
    pub fn from_env() -> Result<Self, ConfigError> {
        let logging_level = logging_level_from_env()?;
        let valid_vote_types = VoteTypes::parse(&required("VALID_VOTE_TYPES")?);
        if valid_vote_types.is_empty() {
            return Err(ConfigError::NoVoteTypes("VALID_VOTE_TYPES"));
        }

        Ok(Self {
            logging_level,
            votes_table_name: required("VOTES_TABLE_NAME")?,
            votes_table_partition_key: required("VOTES_TABLE_PARTITION_KEY")?,
            votes_table_sort_key: env::var("VOTES_TABLE_SORT_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            valid_vote_types,
        })
    }
}

/// Reads `LOGGING_LEVEL`, defaulting to INFO.
pub fn logging_level_from_env() -> Result<Level, ConfigError> {
    match env::var("LOGGING_LEVEL") {
        Ok(level) => parse_log_level(&level),
        Err(_) => Ok(Level::INFO),
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

/// Parses a log level name, accepting the `WARNING` and `CRITICAL` spellings.
pub fn parse_log_level(name: &str) -> Result<Level, ConfigError> {
    match name.trim().to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" | "CRITICAL" => Ok(Level::ERROR),
        _ => Err(ConfigError::InvalidLogLevel(name.to_string())),
    }
}
