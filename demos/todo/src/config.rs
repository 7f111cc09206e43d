//! Configuration for the demo binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use thiserror::Error;

/// Default `tracing` filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "todo=info,slicestore_runtime=debug";

/// Errors from loading [`Config`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean variable held something other than a recognised flag value
    #[error("{key} must be a boolean (true/false, 1/0, yes/no, on/off), got {value:?}")]
    InvalidBool {
        /// Variable name
        key: String,
        /// Offending value
        value: String,
    },
}

/// Demo configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `tracing` filter directives (`RUST_LOG`)
    pub log_filter: String,
    /// Start from the three seed todos (`TODO_SEED`, default `true`)
    pub seed: bool,
    /// Log every dispatch through the action logger (`TODO_LOG_ACTIONS`, default `true`)
    pub log_actions: bool,
    /// Print the final state as JSON (`TODO_PRINT_JSON`, default `false`)
    pub print_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            seed: true,
            log_actions: true,
            print_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] if a boolean variable is set to
    /// something unrecognised.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] if a boolean variable is set to
    /// something unrecognised.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
            seed: bool_var(&lookup, "TODO_SEED", defaults.seed)?,
            log_actions: bool_var(&lookup, "TODO_LOG_ACTIONS", defaults.log_actions)?,
            print_json: bool_var(&lookup, "TODO_PRINT_JSON", defaults.print_json)?,
        })
    }
}

fn bool_var<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: raw,
        }),
    }
}
