//! Tracing setup shared by the CLI and the worker daemon.
//!
//! Two processes log here and they want different things: interactive
//! commands stay quiet and human-readable unless `--debug` or `RUST_LOG`
//! asks for more, while the worker emits JSON lines with source locations
//! so a long-running daemon's logs can be collected and filtered.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Errors that can occur during tracing initialization.
#[derive(Debug, Error)]
pub enum TracingError {
    /// The global subscriber was already set.
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Which process is logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingMode {
    /// Interactive command: terse stderr output, warnings only by default.
    Cli,
    /// Worker daemon: JSON lines with file and line numbers.
    Worker,
}

impl TracingMode {
    fn default_level(self, debug: bool) -> Level {
        if debug {
            Level::DEBUG
        } else {
            match self {
                Self::Cli => Level::WARN,
                Self::Worker => Level::INFO,
            }
        }
    }

    /// The filter directive applied when `RUST_LOG` is not set.
    fn fallback_filter(self, debug: bool) -> String {
        format!("moviepipe={}", self.default_level(debug))
    }
}

/// Initializes the global subscriber for the given mode.
///
/// Call once at startup. `RUST_LOG` overrides the mode's default filter;
/// `debug` raises the default to DEBUG and, for the CLI, switches to a
/// compact format with source locations.
pub fn init_tracing(mode: TracingMode, debug: bool) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(mode.fallback_filter(debug)));

    match mode {
        TracingMode::Cli if debug => {
            let subscriber = tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_file(true)
                .with_line_number(true)
                .without_time()
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        TracingMode::Cli => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .without_time()
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        TracingMode::Worker => {
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_file(true)
                .with_line_number(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}
