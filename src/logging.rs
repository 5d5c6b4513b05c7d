//! Log output for the poregraph binary
//!
//! Logs go to stderr so stdout only ever carries the rendered design.
//! `RUST_LOG` selects the level (`warn` when unset) and
//! `POREGRAPH_LOG_FORMAT` selects `human` (default) or `json` lines.

use std::env;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log format
pub const LOG_FORMAT_VAR: &str = "POREGRAPH_LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset or unparsable
const DEFAULT_FILTER: &str = "warn";

/// Errors that can occur while setting up logging
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The log format variable names no known format
    #[error("unknown log format '{0}' (expected 'human' or 'json')")]
    UnknownFormat(String),

    /// The log format variable is not valid UTF-8
    #[error("POREGRAPH_LOG_FORMAT is not valid UTF-8")]
    NotUnicode,
}

/// How log events are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text lines
    #[default]
    Human,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnknownFormat(other.to_string())),
        }
    }
}

impl LogFormat {
    /// Read the format from the environment, `Human` when unset
    pub fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_VAR) {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(LoggingError::NotUnicode),
        }
    }
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless: if a subscriber is already
/// installed (by an earlier call or a test harness) it is left in place.
///
/// # Errors
///
/// Returns [`LoggingError`] if `POREGRAPH_LOG_FORMAT` is set to an unknown
/// or non-UTF-8 value.
pub fn init_logging() -> Result<(), LoggingError> {
    let format = LogFormat::from_env()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let output = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let output = match format {
        LogFormat::Human => output.boxed(),
        LogFormat::Json => output.json().with_current_span(true).boxed(),
    };

    // Fails only when a global subscriber already exists
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init();
    Ok(())
}
